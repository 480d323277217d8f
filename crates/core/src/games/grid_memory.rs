use super::{EngineError, InputError, Minigame};
use crate::console::{countdown, read_valid};
use crate::{Console, Event, GameConfig, RngState, Tier};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
        }
    }
}

/// Zero-based grid coordinate. Rows are labelled `A..`, columns `1..`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn label(self) -> String {
        format!("{}{}", row_letter(self.row), self.col + 1)
    }
}

pub fn row_letter(row: usize) -> char {
    char::from(b'A' + row as u8)
}

/// Accepts `A1` or `1A` in any case and normalises both to the same cell.
pub fn parse_cell(input: &str, size: usize) -> Result<Cell, InputError> {
    let chars: Vec<char> = input.trim().to_ascii_uppercase().chars().collect();
    let &[first, second] = chars.as_slice() else {
        return Err(InputError::BadPosition { size });
    };
    let row_of = |ch: char| {
        ch.is_ascii_uppercase()
            .then(|| usize::from(ch as u8 - b'A'))
            .filter(|row| *row < size)
    };
    let col_of = |ch: char| {
        ch.to_digit(10)
            .map(|digit| digit as usize)
            .filter(|digit| (1..=size).contains(digit))
            .map(|digit| digit - 1)
    };
    if let (Some(row), Some(col)) = (row_of(first), col_of(second)) {
        return Ok(Cell::new(row, col));
    }
    if let (Some(col), Some(row)) = (col_of(first), row_of(second)) {
        return Ok(Cell::new(row, col));
    }
    Err(InputError::BadPosition { size })
}

/// Remember where three colours sit on an n×n grid.
#[derive(Debug, Clone)]
pub struct GridMemory {
    size: usize,
    marks: Vec<(Color, Cell)>,
    reveal: Duration,
    tick: Duration,
}

impl GridMemory {
    pub fn new(size: usize, reveal: Duration, tick: Duration, rng: &mut RngState) -> Self {
        let cells: Vec<Cell> = (0..size)
            .flat_map(|row| (0..size).map(move |col| Cell::new(row, col)))
            .collect();
        let picked = rng.sample(&cells, Color::ALL.len());
        let marks = Color::ALL.into_iter().zip(picked).collect();
        Self {
            size,
            marks,
            reveal,
            tick,
        }
    }

    pub fn with_marks(
        size: usize,
        marks: [(Color, Cell); 3],
        reveal: Duration,
        tick: Duration,
    ) -> Self {
        Self {
            size,
            marks: marks.to_vec(),
            reveal,
            tick,
        }
    }

    pub fn from_config(tier: Tier, config: &GameConfig, rng: &mut RngState) -> Self {
        Self::new(
            *config.grid_memory.sizes.get(tier),
            config.timing.grid_reveal(),
            config.timing.tick(),
            rng,
        )
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_of(&self, color: Color) -> Option<Cell> {
        self.marks
            .iter()
            .find(|(marked, _)| *marked == color)
            .map(|(_, cell)| *cell)
    }

    pub fn marks(&self) -> &[(Color, Cell)] {
        &self.marks
    }
}

impl Minigame for GridMemory {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(size = self.size, "colour grid dealt");
        console.emit(Event::GridShown {
            size: self.size,
            marks: self.marks.clone(),
        });
        countdown(console, self.reveal, self.tick);
        console.emit(Event::GridHidden { size: self.size });

        let size = self.size;
        let mut correct = 0;
        for (color, actual) in self.marks.clone() {
            let prompt = format!("Where is {}? ", color.name());
            let guess = read_valid(console, &prompt, |line| parse_cell(line, size))?;
            if guess == actual {
                correct += 1;
            }
            console.emit(Event::ColorChecked {
                color,
                guess,
                actual,
            });
        }
        let total = self.marks.len();
        console.emit(Event::GridScored { correct, total });
        Ok(correct == total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedConsole;
    use std::collections::HashSet;

    fn fixed() -> GridMemory {
        GridMemory::with_marks(
            3,
            [
                (Color::Red, Cell::new(0, 0)),
                (Color::Green, Cell::new(1, 2)),
                (Color::Blue, Cell::new(2, 1)),
            ],
            Duration::from_secs(5),
            Duration::from_millis(100),
        )
    }

    #[test]
    fn both_orders_normalise() {
        assert_eq!(parse_cell("A1", 3), Ok(Cell::new(0, 0)));
        assert_eq!(parse_cell("1a", 3), Ok(Cell::new(0, 0)));
        assert_eq!(parse_cell(" b2 ", 3), Ok(Cell::new(1, 1)));
        assert_eq!(parse_cell("3C", 3), Ok(Cell::new(2, 2)));
    }

    #[test]
    fn rejects_out_of_range_and_malformed() {
        let bad = Err(InputError::BadPosition { size: 3 });
        assert_eq!(parse_cell("D1", 3), bad);
        assert_eq!(parse_cell("A4", 3), bad);
        assert_eq!(parse_cell("A0", 3), bad);
        assert_eq!(parse_cell("AA", 3), bad);
        assert_eq!(parse_cell("A12", 3), bad);
        assert_eq!(parse_cell("", 3), bad);
        assert_eq!(parse_cell("E5", 5), Ok(Cell::new(4, 4)));
    }

    #[test]
    fn placement_is_three_distinct_cells_in_bounds() {
        let mut rng = RngState::from_seed(21);
        for size in 3..=5 {
            let game = GridMemory::new(size, Duration::ZERO, Duration::ZERO, &mut rng);
            let cells: HashSet<Cell> = game.marks().iter().map(|(_, cell)| *cell).collect();
            assert_eq!(cells.len(), 3);
            assert!(cells.iter().all(|cell| cell.row < size && cell.col < size));
            for color in Color::ALL {
                assert!(game.cell_of(color).is_some());
            }
        }
    }

    #[test]
    fn all_three_correct_wins() {
        let mut console = ScriptedConsole::new().line("A1").line("3b").line("C2");
        assert_eq!(fixed().attempt(&mut console), Ok(true));
        assert!(console.events().contains(&Event::GridScored {
            correct: 3,
            total: 3
        }));
    }

    #[test]
    fn one_miss_loses_with_partial_score() {
        let mut console = ScriptedConsole::new()
            .line("Z9")
            .line("A1")
            .line("B3")
            .line("A3");
        assert_eq!(fixed().attempt(&mut console), Ok(false));
        assert!(console.events().contains(&Event::Rejected {
            error: InputError::BadPosition { size: 3 }
        }));
        assert!(console.events().contains(&Event::GridScored {
            correct: 2,
            total: 3
        }));
    }
}
