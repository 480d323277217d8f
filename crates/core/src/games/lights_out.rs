use super::{EngineError, InputError, Minigame};
use crate::console::read_valid;
use crate::{Console, Event, GameConfig, RngState, Tier};
use tracing::debug;

/// Lights toggled by each button.
pub const BUTTONS: [[usize; 2]; 3] = [[0, 1], [1, 2], [0, 2]];

pub fn parse_button(input: &str) -> Result<usize, InputError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|button| *button < BUTTONS.len())
        .ok_or(InputError::UnknownButton)
}

#[derive(Debug, Clone)]
pub struct LightsOut {
    lights: [bool; 3],
    steps: u8,
}

impl LightsOut {
    /// Every press flips two lights, so the lit count keeps its parity. With
    /// `solvable_start` an odd start has one random light flipped, which lands
    /// uniformly on the four even states.
    pub fn new(steps: u8, solvable_start: bool, rng: &mut RngState) -> Self {
        let mut lights = [rng.coin(), rng.coin(), rng.coin()];
        let lit = lights.iter().filter(|light| **light).count();
        if solvable_start && lit % 2 == 1 {
            let flip = rng.index(lights.len());
            lights[flip] = !lights[flip];
        }
        Self::with_lights(lights, steps)
    }

    pub fn with_lights(lights: [bool; 3], steps: u8) -> Self {
        Self { lights, steps }
    }

    pub fn from_config(tier: Tier, config: &GameConfig, rng: &mut RngState) -> Self {
        let rule = &config.lights_out;
        Self::new(*rule.steps.get(tier), rule.solvable_start, rng)
    }

    pub fn lights(&self) -> [bool; 3] {
        self.lights
    }

    pub fn steps_left(&self) -> u8 {
        self.steps
    }

    pub fn is_dark(&self) -> bool {
        self.lights.iter().all(|light| !light)
    }

    /// Toggles the button's pair and spends a step.
    pub fn press(&mut self, button: usize) {
        for light in BUTTONS[button] {
            self.lights[light] = !self.lights[light];
        }
        self.steps = self.steps.saturating_sub(1);
    }

    fn show(&self, console: &mut dyn Console) {
        console.emit(Event::LightsBoard {
            lights: self.lights,
            steps_left: self.steps,
        });
    }
}

impl Minigame for LightsOut {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(lights = ?self.lights, steps = self.steps, "lights out dealt");
        while self.steps > 0 {
            self.show(console);
            if self.is_dark() {
                console.emit(Event::LightsResult { solved: true });
                return Ok(true);
            }
            let button = read_valid(console, "Press button (0-2): ", parse_button)?;
            self.press(button);
        }
        self.show(console);
        let solved = self.is_dark();
        console.emit(Event::LightsResult { solved });
        Ok(solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedConsole;

    #[test]
    fn pressing_twice_is_identity() {
        for button in 0..3 {
            let mut game = LightsOut::with_lights([true, false, true], 7);
            game.press(button);
            assert_ne!(game.lights(), [true, false, true]);
            game.press(button);
            assert_eq!(game.lights(), [true, false, true]);
            assert_eq!(game.steps_left(), 5);
        }
    }

    #[test]
    fn dark_start_wins_without_input() {
        let mut console = ScriptedConsole::new();
        let mut game = LightsOut::with_lights([false, false, false], 7);
        assert_eq!(game.attempt(&mut console), Ok(true));
        assert_eq!(game.steps_left(), 7);
    }

    #[test]
    fn one_press_clears_a_pair() {
        let mut console = ScriptedConsole::with_lines(["9", "two", "2"]);
        let mut game = LightsOut::with_lights([true, false, true], 5);
        assert_eq!(game.attempt(&mut console), Ok(true));
        assert_eq!(game.steps_left(), 4);
        let rejected = console
            .events()
            .iter()
            .filter(|event| matches!(event, Event::Rejected { .. }))
            .count();
        assert_eq!(rejected, 2);
    }

    #[test]
    fn win_on_the_last_step_counts() {
        let mut console = ScriptedConsole::with_lines(["0"]);
        let mut game = LightsOut::with_lights([true, true, false], 1);
        assert_eq!(game.attempt(&mut console), Ok(true));
        assert_eq!(game.steps_left(), 0);
    }

    #[test]
    fn odd_start_runs_out_of_steps() {
        let mut console = ScriptedConsole::with_lines(["0", "1"]);
        let mut game = LightsOut::with_lights([true, false, false], 2);
        assert_eq!(game.attempt(&mut console), Ok(false));
        assert!(console
            .events()
            .contains(&Event::LightsResult { solved: false }));
    }

    #[test]
    fn solvable_start_has_even_parity() {
        let mut rng = RngState::from_seed(17);
        for _ in 0..200 {
            let game = LightsOut::new(5, true, &mut rng);
            let lit = game.lights().iter().filter(|light| **light).count();
            assert_eq!(lit % 2, 0);
        }
    }
}
