use borderlands_core::games::code_breaker::Mark;
use borderlands_core::games::grid_memory::{row_letter, Cell, Color as Paint};
use borderlands_core::games::lights_out::BUTTONS;
use borderlands_core::games::rps::RoundResult;
use borderlands_core::{Card, Event, RunState, DECK_SIZE};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

const MENU_ITEMS: [&str; 4] = ["New Game", "Load Game", "View Cards", "Exit"];
const TERMINAL_WIDTH: usize = 80;

/// Turns engine events into terminal output.
///
/// Countdown ticks redraw a single line in place and only when the whole-second
/// value changes; any other output first finishes that line.
#[derive(Debug, Default)]
pub struct Renderer {
    countdown: Option<u64>,
}

impl Renderer {
    pub fn prompt<W: Write>(&mut self, out: &mut W, prompt: &str) -> io::Result<()> {
        self.end_countdown(out)?;
        write!(out, "{prompt}")?;
        out.flush()
    }

    pub fn clear<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.countdown = None;
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        out.flush()
    }

    fn end_countdown<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.countdown.take().is_some() {
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn event<W: Write>(&mut self, out: &mut W, event: &Event) -> io::Result<()> {
        if let Event::Countdown { remaining } = event {
            let seconds = remaining.as_millis().div_ceil(1000) as u64;
            if self.countdown == Some(seconds) {
                return Ok(());
            }
            self.countdown = Some(seconds);
            write!(out, "\r⏳ {:<24}", format!("{seconds}s left"))?;
            return out.flush();
        }
        self.end_countdown(out)?;
        match event {
            Event::SequenceHidden { .. } | Event::GridHidden { .. } => self.clear(out)?,
            _ => {}
        }
        writeln!(out, "{}", describe(event))?;
        out.flush()
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::RunStarted { position: 0, total } => {
            format!("\n🕹️ Game starts! There are {total} cards.")
        }
        Event::RunStarted { position, total } => {
            format!("\n🕹️ Game loaded! Remaining cards: {}", total - position)
        }
        Event::CardDrawn {
            card,
            position,
            kind,
        } => format!(
            "\nPlaying card {}/{DECK_SIZE}: {card}  ({})\n{}",
            position + 1,
            kind.title(),
            card_art(*card)
        ),
        Event::CardCleared { card, .. } => format!("✅ {card} cleared.").green().to_string(),
        Event::RunWon { .. } => "\n🏆 You successfully passed all cards! You survived."
            .green()
            .bold()
            .to_string(),
        Event::RunSaved { position } => {
            format!("\n✅ Game saved! ({position}/{DECK_SIZE} cleared)").green().to_string()
        }
        Event::SaveFailed { reason } => format!("\n❌ Could not save the game: {reason}")
            .red()
            .to_string(),
        Event::RunLost { card, .. } => {
            format!("\n💀 You lost the game. Card: {card}\n🩸 You died.")
                .red()
                .to_string()
        }
        Event::GameStarted { kind } => format!("\n=== {} ===", kind.title()).bold().to_string(),
        Event::GameFinished { kind, won: true } => format!("{} complete.", kind.title()),
        Event::GameFinished { kind, won: false } => format!("{} failed.", kind.title()),
        Event::Rejected { error } => format!("❌ {error}").yellow().to_string(),
        Event::Countdown { .. } => String::new(),

        Event::SequenceShown { digits } => {
            format!("Memorize these numbers:\n\n    {}\n", join(digits, " "))
        }
        Event::SequenceHidden { length } => {
            format!("The numbers are gone. Type all {length} in order.")
        }
        Event::SequenceChecked {
            correct: true,
            ..
        } => "🎉 Correct!".green().to_string(),
        Event::SequenceChecked { expected, .. } => {
            format!("Wrong! The numbers were: {}", join(expected, " "))
                .red()
                .to_string()
        }

        Event::GridShown { size, marks } => {
            format!("Remember where each colour sits:\n\n{}", grid(*size, marks))
        }
        Event::GridHidden { size } => format!(
            "The {size}x{size} grid is hidden. Name each colour's cell (e.g. A1 or 1A)."
        ),
        Event::ColorChecked {
            color,
            guess,
            actual,
        } if guess == actual => format!("✓ {} at {}", color.name(), actual.label())
            .green()
            .to_string(),
        Event::ColorChecked {
            color,
            guess,
            actual,
        } => format!(
            "✗ {} was at {}, not {}",
            color.name(),
            actual.label(),
            guess.label()
        )
        .red()
        .to_string(),
        Event::GridScored { correct, total } => format!("You found {correct}/{total} colours."),

        Event::WordProgress {
            masked,
            remaining,
            guessed,
        } => {
            let tried: Vec<String> = guessed.iter().map(char::to_string).collect();
            format!(
                "\nWord: {masked}\nWrong guesses left: {remaining}   Tried: {}",
                if tried.is_empty() {
                    "-".to_string()
                } else {
                    tried.join(", ")
                }
            )
        }
        Event::WordRevealed { word, solved: true } => {
            format!("🎉 You found the word: {word}").green().to_string()
        }
        Event::WordRevealed { word, .. } => {
            format!("Out of guesses. The word was: {word}").red().to_string()
        }

        Event::RaceReady { limit } => format!(
            "An encrypted door blocks the way. Unscramble the word within {} seconds.",
            limit.as_secs()
        ),
        Event::RaceStarted { scrambled } => format!(
            "🔐 Scrambled: {}\nType your answer and press Enter.",
            scrambled.to_uppercase().bold()
        ),
        Event::RaceMissed { guess } => format!("✗ '{guess}' is not it. Keep trying!")
            .yellow()
            .to_string(),
        Event::RaceSolved { word } => format!("🔓 The door opens: {word}!").green().to_string(),
        Event::RaceTimeUp { word } => format!("⏰ Time's up! The word was: {word}")
            .red()
            .to_string(),

        Event::SokobanBoard { rows } => sokoban(rows),
        Event::SokobanStuck => "The box won't budge. You're stuck!".red().to_string(),
        Event::SokobanSolved => "📦 Every target is covered!".green().to_string(),

        Event::LightsBoard { lights, steps_left } => lights_board(lights, *steps_left),
        Event::LightsResult { solved: true } => "💡 All lights are off!".green().to_string(),
        Event::LightsResult { solved: false } => {
            "Out of steps with lights still on.".red().to_string()
        }

        Event::CodeStarted { length, attempts } => format!(
            "Crack the {length}-digit code. Digits never repeat. You have {attempts} attempts.\n\
             {} right place   {} wrong place   {} not in the code",
            "●".green(),
            "●".yellow(),
            "●".dark_grey()
        ),
        Event::CodeFeedback {
            attempt,
            guess,
            marks,
        } => format!("  {attempt}: {}", code_feedback(guess, marks)),
        Event::CodeResult {
            cracked: true,
            code,
        } => format!("🔓 Code cracked: {}", join(code, ""))
            .green()
            .to_string(),
        Event::CodeResult { code, .. } => format!("Locked out. The code was: {}", join(code, ""))
            .red()
            .to_string(),

        Event::RpsStarted { target } => format!("First to {target} round wins takes the match."),
        Event::RpsRound {
            player,
            opponent,
            result,
            player_score,
            opponent_score,
            target,
        } => {
            let verdict = match result {
                RoundResult::Win => "You win the round!".green(),
                RoundResult::Loss => "You lose the round.".red(),
                RoundResult::Tie => "Tie.".yellow(),
            };
            format!(
                "You: {}  Opponent: {}  {verdict}  Score {player_score}-{opponent_score} (first to {target})",
                player.name(),
                opponent.name()
            )
        }
    }
}

fn join<T: ToString>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn card_art(card: Card) -> String {
    let label = card.rank.label();
    let art = format!(
        "┌─────────┐\n\
         │ {label:<2}      │\n\
         │         │\n\
         │    {}    │\n\
         │         │\n\
         │      {label:>2} │\n\
         └─────────┘",
        card.suit.glyph()
    );
    if card.suit.is_red() {
        art.red().to_string()
    } else {
        art.white().to_string()
    }
}

fn grid(size: usize, marks: &[(Paint, Cell)]) -> String {
    let mut lines = Vec::with_capacity(size + 1);
    let header: Vec<String> = (1..=size).map(|col| col.to_string()).collect();
    lines.push(format!("    {}", header.join(" ")));
    for row in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|col| {
                let here = Cell::new(row, col);
                match marks.iter().find(|(_, cell)| *cell == here) {
                    Some((Paint::Red, _)) => "R".red().bold().to_string(),
                    Some((Paint::Green, _)) => "G".green().bold().to_string(),
                    Some((Paint::Blue, _)) => "B".blue().bold().to_string(),
                    None => "·".to_string(),
                }
            })
            .collect();
        lines.push(format!("  {} {}", row_letter(row), cells.join(" ")));
    }
    lines.join("\n")
}

fn sokoban(rows: &[String]) -> String {
    let body: Vec<String> = rows
        .iter()
        .map(|row| {
            row.chars()
                .map(|tile| match tile {
                    '@' | '+' => "@".cyan().bold().to_string(),
                    '$' => "$".yellow().to_string(),
                    '*' => "*".green().to_string(),
                    '.' => ".".red().to_string(),
                    '#' => "#".dark_grey().to_string(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();
    format!(
        "\n{}\n@ you   $ box   . target   * box on target\nMove with w/a/s/d. Pushing a box into anything ends the game.",
        body.join("\n")
    )
}

fn lights_board(lights: &[bool; 3], steps_left: u8) -> String {
    let bulbs: Vec<String> = lights
        .iter()
        .enumerate()
        .map(|(index, on)| {
            if *on {
                format!("[{index}:●]").yellow().to_string()
            } else {
                format!("[{index}:○]").dark_grey().to_string()
            }
        })
        .collect();
    let buttons: Vec<String> = BUTTONS
        .iter()
        .enumerate()
        .map(|(button, [a, b])| format!("{button} → {a}+{b}"))
        .collect();
    format!(
        "\nLights: {}   Steps left: {steps_left}\nButtons: {}",
        bulbs.join(" "),
        buttons.join("   ")
    )
}

fn code_feedback(guess: &[u8], marks: &[Mark]) -> String {
    guess
        .iter()
        .zip(marks)
        .map(|(digit, mark)| {
            let digit = digit.to_string();
            match mark {
                Mark::Exact => digit.green().bold().to_string(),
                Mark::Present => digit.yellow().to_string(),
                Mark::Absent => digit.dark_grey().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn welcome() -> String {
    let title = "🎴  W E L C O M E   T O   B O R D E R L A N D S !  🎴";
    let mut lines = vec![String::new(), centered(title).bold().to_string(), String::new()];
    for (index, item) in MENU_ITEMS.iter().enumerate() {
        lines.push(centered(&format!("{}. {item}", index + 1)));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn centered(text: &str) -> String {
    let width = text.chars().count();
    let padding = TERMINAL_WIDTH.saturating_sub(width) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// Progress summary for the View Cards menu entry.
pub fn cleared_cards(state: &RunState) -> String {
    let mut lines = vec![
        "\n📚 Your Cards:".to_string(),
        format!(
            "Progress: {}/{} cards completed\n",
            state.position(),
            state.deck().len()
        ),
        "Card List:".to_string(),
        "-".repeat(50),
    ];
    for (index, card) in state.cleared().iter().enumerate() {
        lines.push(format!("✓ Card {}: {card}", index + 1));
    }
    lines.push("-".repeat(50));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use borderlands_core::{Deck, GameKind, InputError, Rank, Suit};
    use std::time::Duration;

    fn rendered(renderer: &mut Renderer, event: Event) -> String {
        let mut out = Vec::new();
        renderer.event(&mut out, &event).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn drawn_card_shows_art_and_game() {
        let text = rendered(
            &mut Renderer::default(),
            Event::CardDrawn {
                card: Card::new(Suit::Spades, Rank::Ace),
                position: 0,
                kind: GameKind::LightsOut,
            },
        );
        assert!(text.contains("1/24"));
        assert!(text.contains("Lights Out"));
        assert!(text.contains("│    ♠    │"));
        assert!(text.contains("│ A       │"));
    }

    #[test]
    fn countdown_redraws_once_per_second() {
        let mut renderer = Renderer::default();
        let first = rendered(
            &mut renderer,
            Event::Countdown {
                remaining: Duration::from_millis(7_950),
            },
        );
        assert!(first.starts_with('\r'));
        assert!(first.contains("8s left"));
        let same = rendered(
            &mut renderer,
            Event::Countdown {
                remaining: Duration::from_millis(7_850),
            },
        );
        assert!(same.is_empty());
        let next = rendered(
            &mut renderer,
            Event::Rejected {
                error: InputError::NotANumber,
            },
        );
        assert!(next.starts_with('\n'));
        assert!(next.contains("please enter valid numbers"));
    }

    #[test]
    fn view_cards_lists_cleared_prefix() {
        let mut state = RunState::new(Deck::standard24());
        state.advance().expect("card");
        state.advance().expect("card");
        let text = cleared_cards(&state);
        assert!(text.contains("Progress: 2/24"));
        assert!(text.contains("✓ Card 1: ♥ A"));
        assert!(text.contains("✓ Card 2: ♥ 2"));
        assert!(!text.contains("Card 3:"));
    }

    #[test]
    fn grid_marks_each_colour() {
        let text = grid(
            3,
            &[
                (Paint::Red, Cell::new(0, 0)),
                (Paint::Green, Cell::new(1, 2)),
                (Paint::Blue, Cell::new(2, 1)),
            ],
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains('R'));
        assert!(lines[2].contains('G'));
        assert!(lines[3].contains('B'));
    }

    #[test]
    fn save_results_are_reported() {
        let mut renderer = Renderer::default();
        let saved = rendered(&mut renderer, Event::RunSaved { position: 3 });
        assert!(saved.contains("Game saved!"));
        assert!(saved.contains("3/24"));
        let failed = rendered(
            &mut renderer,
            Event::SaveFailed {
                reason: "disk full".to_string(),
            },
        );
        assert!(failed.contains("Could not save the game: disk full"));
    }
}
