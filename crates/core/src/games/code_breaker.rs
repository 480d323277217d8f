use super::{EngineError, InputError, Minigame};
use crate::console::read_valid;
use crate::{Console, Event, GameConfig, RngState, Tier};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DIGITS: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mark {
    Exact,
    Present,
    Absent,
}

/// Mastermind over distinct digits with `length + 1` attempts.
#[derive(Debug, Clone)]
pub struct CodeBreaker {
    code: Vec<u8>,
}

impl CodeBreaker {
    pub fn new(length: usize, rng: &mut RngState) -> Self {
        Self::with_code(rng.sample(&DIGITS, length))
    }

    pub fn with_code(code: Vec<u8>) -> Self {
        Self { code }
    }

    pub fn from_config(tier: Tier, config: &GameConfig, rng: &mut RngState) -> Self {
        Self::new(*config.code_breaker.lengths.get(tier), rng)
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn max_attempts(&self) -> usize {
        self.code.len() + 1
    }

    /// Digits are unique, so plain membership is enough for `Present`.
    pub fn feedback(&self, guess: &[u8]) -> Vec<Mark> {
        guess
            .iter()
            .zip(&self.code)
            .map(|(digit, secret)| {
                if digit == secret {
                    Mark::Exact
                } else if self.code.contains(digit) {
                    Mark::Present
                } else {
                    Mark::Absent
                }
            })
            .collect()
    }

    pub fn parse_guess(&self, input: &str) -> Result<Vec<u8>, InputError> {
        let digits = input
            .trim()
            .chars()
            .map(|ch| ch.to_digit(10).map(|digit| digit as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or(InputError::NotDigits)?;
        if digits.len() != self.code.len() {
            return Err(InputError::WrongLength {
                expected: self.code.len(),
            });
        }
        Ok(digits)
    }
}

impl Minigame for CodeBreaker {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(length = self.code.len(), "code generated");
        let attempts = self.max_attempts();
        console.emit(Event::CodeStarted {
            length: self.code.len(),
            attempts,
        });
        for attempt in 1..=attempts {
            let prompt = format!("Guess {attempt}: ");
            let guess = read_valid(console, &prompt, |line| self.parse_guess(line))?;
            let marks = self.feedback(&guess);
            let cracked = guess == self.code;
            console.emit(Event::CodeFeedback {
                attempt,
                guess,
                marks,
            });
            if cracked {
                console.emit(Event::CodeResult {
                    code: self.code.clone(),
                    cracked: true,
                });
                return Ok(true);
            }
        }
        console.emit(Event::CodeResult {
            code: self.code.clone(),
            cracked: false,
        });
        Ok(false)
    }
}
