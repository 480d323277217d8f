use super::{EngineError, Minigame};
use crate::console::{read, Poll};
use crate::{ConfigError, Console, Event, GameConfig, RngState, Tier};
use std::time::Duration;
use tracing::debug;

/// Unscramble a word before the countdown hits zero.
#[derive(Debug, Clone)]
pub struct WordRace {
    word: String,
    scrambled: String,
    limit: Duration,
    tick: Duration,
}

/// Shuffles until the letters differ from `word`. Words with a single distinct
/// letter come back unchanged.
pub fn scramble(word: &str, rng: &mut RngState) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    if letters.iter().all(|ch| *ch == letters[0]) {
        return word.to_string();
    }
    loop {
        rng.shuffle(&mut letters);
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
}

impl WordRace {
    pub fn new(word: &str, limit: Duration, tick: Duration, rng: &mut RngState) -> Self {
        let word = word.to_ascii_lowercase();
        let scrambled = scramble(&word, rng);
        Self::with_scramble(&word, &scrambled, limit, tick)
    }

    pub fn with_scramble(word: &str, scrambled: &str, limit: Duration, tick: Duration) -> Self {
        Self {
            word: word.to_ascii_lowercase(),
            scrambled: scrambled.to_string(),
            limit,
            tick,
        }
    }

    pub fn from_config(
        tier: Tier,
        config: &GameConfig,
        rng: &mut RngState,
    ) -> Result<Self, ConfigError> {
        let word = rng
            .choose(config.word_race.words.get(tier))
            .ok_or(ConfigError::EmptyWordList {
                game: "word race",
                tier,
            })?
            .clone();
        Ok(Self::new(
            &word,
            config.timing.race_limit(),
            config.timing.tick(),
            rng,
        ))
    }

    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    pub fn is_answer(&self, guess: &str) -> bool {
        guess.trim().eq_ignore_ascii_case(&self.word)
    }
}

impl Minigame for WordRace {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(scrambled = %self.scrambled, "word race ready");
        console.emit(Event::RaceReady { limit: self.limit });
        read(console, "Press Enter to start...")?;
        console.emit(Event::RaceStarted {
            scrambled: self.scrambled.clone(),
        });

        let start = console.now();
        loop {
            let elapsed = console.now().saturating_sub(start);
            if elapsed >= self.limit {
                console.emit(Event::RaceTimeUp {
                    word: self.word.clone(),
                });
                return Ok(false);
            }
            let remaining = self.limit - elapsed;
            console.emit(Event::Countdown { remaining });
            match console.poll_line(remaining.min(self.tick)) {
                Poll::Line(line) => {
                    let guess = line.trim();
                    if guess.is_empty() {
                        continue;
                    }
                    if self.is_answer(guess) {
                        console.emit(Event::RaceSolved {
                            word: self.word.clone(),
                        });
                        return Ok(true);
                    }
                    console.emit(Event::RaceMissed {
                        guess: guess.to_string(),
                    });
                }
                Poll::Idle => {}
                Poll::Closed => return Err(EngineError::InputClosed),
            }
        }
    }
}
