use super::{EngineError, InputError, Minigame};
use crate::console::read;
use crate::{ConfigError, Console, Event, GameConfig, RngState, Tier};
use std::collections::BTreeSet;
use tracing::debug;

/// Hangman: find every letter before the wrong-guess budget runs out.
#[derive(Debug, Clone)]
pub struct WordGuess {
    word: String,
    guessed: BTreeSet<char>,
    remaining: u8,
}

impl WordGuess {
    pub fn new(word: &str, budget: u8) -> Self {
        Self {
            word: word.to_ascii_lowercase(),
            guessed: BTreeSet::new(),
            remaining: budget,
        }
    }

    pub fn from_config(
        tier: Tier,
        config: &GameConfig,
        rng: &mut RngState,
    ) -> Result<Self, ConfigError> {
        let rule = &config.word_guess;
        let word = rng
            .choose(rule.words.get(tier))
            .ok_or(ConfigError::EmptyWordList {
                game: "word guess",
                tier,
            })?;
        Ok(Self::new(word, rule.wrong_guesses))
    }

    /// Applies one guess. `Ok(true)` when the letter is in the word.
    pub fn guess(&mut self, input: &str) -> Result<bool, InputError> {
        let mut chars = input.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => ch.to_ascii_lowercase(),
            _ => return Err(InputError::NotALetter),
        };
        if !self.guessed.insert(letter) {
            return Err(InputError::AlreadyGuessed(letter));
        }
        let hit = self.word.contains(letter);
        if !hit {
            self.remaining = self.remaining.saturating_sub(1);
        }
        Ok(hit)
    }

    pub fn is_won(&self) -> bool {
        self.word.chars().all(|ch| self.guessed.contains(&ch))
    }

    pub fn is_lost(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn masked(&self) -> String {
        self.word
            .chars()
            .map(|ch| if self.guessed.contains(&ch) { ch } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Minigame for WordGuess {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(letters = self.word.len(), "hangman word picked");
        loop {
            if self.is_won() || self.is_lost() {
                let solved = self.is_won();
                console.emit(Event::WordRevealed {
                    word: self.word.clone(),
                    solved,
                });
                return Ok(solved);
            }
            console.emit(Event::WordProgress {
                masked: self.masked(),
                remaining: self.remaining,
                guessed: self.guessed.iter().copied().collect(),
            });
            let line = read(console, "Enter a letter: ")?;
            if let Err(error) = self.guess(&line) {
                console.emit(Event::Rejected { error });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedConsole;

    #[test]
    fn repeat_guess_costs_nothing() {
        let mut game = WordGuess::new("team", 6);
        assert_eq!(game.guess("z"), Ok(false));
        assert_eq!(game.remaining(), 5);
        assert_eq!(game.guess("Z"), Err(InputError::AlreadyGuessed('z')));
        assert_eq!(game.remaining(), 5);
    }

    #[test]
    fn rejects_non_letters_without_cost() {
        let mut game = WordGuess::new("team", 6);
        assert_eq!(game.guess("ab"), Err(InputError::NotALetter));
        assert_eq!(game.guess("4"), Err(InputError::NotALetter));
        assert_eq!(game.guess(""), Err(InputError::NotALetter));
        assert_eq!(game.remaining(), 6);
    }

    #[test]
    fn wins_despite_misses_within_budget() {
        let mut console = ScriptedConsole::with_lines(["x", "t", "q", "e", "a", "a", "m"]);
        let mut game = WordGuess::new("team", 6);
        assert_eq!(game.attempt(&mut console), Ok(true));
        assert_eq!(game.remaining(), 4);
        assert!(console.events().contains(&Event::WordRevealed {
            word: "team".to_string(),
            solved: true
        }));
    }

    #[test]
    fn budget_exhaustion_loses() {
        let mut console = ScriptedConsole::with_lines(["b", "c", "d", "g", "h", "i"]);
        let mut game = WordGuess::new("team", 6);
        assert_eq!(game.attempt(&mut console), Ok(false));
        assert!(game.is_lost());
    }

    #[test]
    fn masked_shows_found_letters() {
        let mut game = WordGuess::new("final", 6);
        game.guess("a").expect("guess");
        assert_eq!(game.masked(), "_ _ _ a _");
    }
}
