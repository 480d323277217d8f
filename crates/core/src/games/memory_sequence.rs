use super::{EngineError, InputError, Minigame};
use crate::console::{countdown, read, read_valid};
use crate::{Console, Event, GameConfig, RngState, Tier};
use std::time::Duration;
use tracing::debug;

const DIGITS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Recall a run of distinct digits in order after a timed look.
#[derive(Debug, Clone)]
pub struct MemorySequence {
    digits: Vec<u8>,
    memorize: Duration,
    tick: Duration,
}

impl MemorySequence {
    pub fn new(length: usize, memorize: Duration, tick: Duration, rng: &mut RngState) -> Self {
        Self::with_digits(rng.sample(&DIGITS, length), memorize, tick)
    }

    pub fn with_digits(digits: Vec<u8>, memorize: Duration, tick: Duration) -> Self {
        Self {
            digits,
            memorize,
            tick,
        }
    }

    pub fn from_config(tier: Tier, config: &GameConfig, rng: &mut RngState) -> Self {
        let timing = &config.timing;
        Self::new(
            *config.memory_sequence.lengths.get(tier),
            timing.memorize(),
            timing.tick(),
            rng,
        )
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn check(&self, answer: &[u32]) -> bool {
        answer.len() == self.digits.len()
            && answer
                .iter()
                .zip(&self.digits)
                .all(|(given, digit)| *given == u32::from(*digit))
    }
}

pub fn parse_answer(line: &str, expected: usize) -> Result<Vec<u32>, InputError> {
    let values = line
        .split_whitespace()
        .map(|token| token.parse::<u32>().map_err(|_| InputError::NotANumber))
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(InputError::WrongCount { expected });
    }
    Ok(values)
}

impl Minigame for MemorySequence {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(length = self.digits.len(), "memory sequence dealt");
        read(console, "Press Enter to start...")?;
        console.emit(Event::SequenceShown {
            digits: self.digits.clone(),
        });
        countdown(console, self.memorize, self.tick);
        let length = self.digits.len();
        console.emit(Event::SequenceHidden { length });
        let answer = read_valid(console, "Enter the numbers (space-separated): ", |line| {
            parse_answer(line, length)
        })?;
        let correct = self.check(&answer);
        console.emit(Event::SequenceChecked {
            expected: self.digits.clone(),
            correct,
        });
        Ok(correct)
    }
}
