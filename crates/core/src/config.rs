use crate::games::sokoban::{Board, LevelError};
use crate::Tier;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// One value per difficulty tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tiered<T> {
    pub low: T,
    pub mid: T,
    pub high: T,
}

impl<T> Tiered<T> {
    pub fn new(low: T, mid: T, high: T) -> Self {
        Self { low, mid, high }
    }

    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::Low => &self.low,
            Tier::Mid => &self.mid,
            Tier::High => &self.high,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        [
            (Tier::Low, &self.low),
            (Tier::Mid, &self.mid),
            (Tier::High, &self.high),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingRule {
    pub card_reveal_ms: u64,
    pub memorize_ms: u64,
    pub grid_reveal_ms: u64,
    pub race_limit_ms: u64,
    pub tick_ms: u64,
}

impl TimingRule {
    pub fn card_reveal(&self) -> Duration {
        Duration::from_millis(self.card_reveal_ms)
    }

    pub fn memorize(&self) -> Duration {
        Duration::from_millis(self.memorize_ms)
    }

    pub fn grid_reveal(&self) -> Duration {
        Duration::from_millis(self.grid_reveal_ms)
    }

    pub fn race_limit(&self) -> Duration {
        Duration::from_millis(self.race_limit_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Drops the presentation pauses; the race countdown is gameplay and stays.
    pub fn without_pauses(&self) -> Self {
        Self {
            card_reveal_ms: 0,
            memorize_ms: 0,
            grid_reveal_ms: 0,
            ..self.clone()
        }
    }
}

impl Default for TimingRule {
    fn default() -> Self {
        Self {
            card_reveal_ms: 3_000,
            memorize_ms: 8_000,
            grid_reveal_ms: 5_000,
            race_limit_ms: 15_000,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MemorySequenceRule {
    pub lengths: Tiered<usize>,
}

impl Default for MemorySequenceRule {
    fn default() -> Self {
        Self {
            lengths: Tiered::new(3, 4, 5),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridMemoryRule {
    pub sizes: Tiered<usize>,
}

impl Default for GridMemoryRule {
    fn default() -> Self {
        Self {
            sizes: Tiered::new(3, 4, 5),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WordGuessRule {
    pub wrong_guesses: u8,
    pub words: Tiered<Vec<String>>,
}

impl Default for WordGuessRule {
    fn default() -> Self {
        Self {
            wrong_guesses: 6,
            words: Tiered::new(
                strings(&["team", "final"]),
                strings(&["design", "project"]),
                strings(&["computer", "software"]),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WordRaceRule {
    pub words: Tiered<Vec<String>>,
}

impl Default for WordRaceRule {
    fn default() -> Self {
        Self {
            words: Tiered::new(
                strings(&["code", "maze", "play", "data"]),
                strings(&["brain", "object", "random", "player"]),
                strings(&["function", "program", "simulate", "solution"]),
            ),
        }
    }
}

/// Layouts in XSB notation, one row per string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SokobanRule {
    pub levels: Tiered<Vec<String>>,
}

impl Default for SokobanRule {
    fn default() -> Self {
        Self {
            levels: Tiered::new(
                strings(&["#####", "#  .#", "# $ #", "# @ #", "#####"]),
                strings(&[
                    "######", "#  . #", "# $# #", "#  $ #", "#@ . #", "######",
                ]),
                strings(&[
                    "#######", "# $ . #", "#   # #", "# #$  #", "#   .$#", "# .  @#", "#######",
                ]),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LightsOutRule {
    pub steps: Tiered<u8>,
    /// Flip one light of a start whose lit count is odd; the buttons cannot clear those.
    pub solvable_start: bool,
}

impl Default for LightsOutRule {
    fn default() -> Self {
        Self {
            steps: Tiered::new(7, 6, 5),
            solvable_start: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodeBreakerRule {
    pub lengths: Tiered<usize>,
}

impl Default for CodeBreakerRule {
    fn default() -> Self {
        Self {
            lengths: Tiered::new(3, 4, 5),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RpsRule {
    pub wins: Tiered<u8>,
}

impl Default for RpsRule {
    fn default() -> Self {
        Self {
            wins: Tiered::new(3, 2, 1),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingRule,
    pub memory_sequence: MemorySequenceRule,
    pub grid_memory: GridMemoryRule,
    pub word_guess: WordGuessRule,
    pub word_race: WordRaceRule,
    pub sokoban: SokobanRule,
    pub lights_out: LightsOutRule,
    pub code_breaker: CodeBreakerRule,
    pub rps: RpsRule,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{game}: empty word list for {tier:?} tier")]
    EmptyWordList { game: &'static str, tier: Tier },
    #[error("{game}: word {word:?} must be ascii letters only")]
    InvalidWord { game: &'static str, word: String },
    #[error("word race: {0:?} has fewer than two distinct letters and cannot be scrambled")]
    UnscramblableWord(String),
    #[error("memory sequence: length {0} outside 1..=9")]
    SequenceLength(usize),
    #[error("grid memory: size {0} outside 2..=9")]
    GridSize(usize),
    #[error("code breaker: length {0} outside 1..=10")]
    CodeLength(usize),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("sokoban {tier:?} level: {source}")]
    Level {
        tier: Tier,
        #[source]
        source: LevelError,
    },
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.tick_ms == 0 {
            return Err(ConfigError::Zero("timing.tick_ms"));
        }
        if self.timing.race_limit_ms == 0 {
            return Err(ConfigError::Zero("timing.race_limit_ms"));
        }
        for (_, &len) in self.memory_sequence.lengths.iter() {
            if !(1..=9).contains(&len) {
                return Err(ConfigError::SequenceLength(len));
            }
        }
        for (_, &size) in self.grid_memory.sizes.iter() {
            // three colours need three cells; labels run A..I and 1..9
            if !(2..=9).contains(&size) {
                return Err(ConfigError::GridSize(size));
            }
        }
        for (_, &len) in self.code_breaker.lengths.iter() {
            if !(1..=10).contains(&len) {
                return Err(ConfigError::CodeLength(len));
            }
        }
        if self.word_guess.wrong_guesses == 0 {
            return Err(ConfigError::Zero("word_guess.wrong_guesses"));
        }
        for (_, &steps) in self.lights_out.steps.iter() {
            if steps == 0 {
                return Err(ConfigError::Zero("lights_out.steps"));
            }
        }
        for (_, &wins) in self.rps.wins.iter() {
            if wins == 0 {
                return Err(ConfigError::Zero("rps.wins"));
            }
        }
        check_words("word guess", &self.word_guess.words)?;
        check_words("word race", &self.word_race.words)?;
        for (_, list) in self.word_race.words.iter() {
            for word in list {
                let mut letters: Vec<char> = word.to_ascii_lowercase().chars().collect();
                letters.sort_unstable();
                letters.dedup();
                if letters.len() < 2 {
                    return Err(ConfigError::UnscramblableWord(word.clone()));
                }
            }
        }
        for (tier, rows) in self.sokoban.levels.iter() {
            Board::parse(rows).map_err(|source| ConfigError::Level { tier, source })?;
        }
        Ok(())
    }
}

fn check_words(game: &'static str, lists: &Tiered<Vec<String>>) -> Result<(), ConfigError> {
    for (tier, list) in lists.iter() {
        if list.is_empty() {
            return Err(ConfigError::EmptyWordList { game, tier });
        }
        if let Some(word) = list
            .iter()
            .find(|word| word.is_empty() || !word.chars().all(|ch| ch.is_ascii_alphabetic()))
        {
            return Err(ConfigError::InvalidWord {
                game,
                word: word.clone(),
            });
        }
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_unscramblable_race_word() {
        let mut config = GameConfig::default();
        config.word_race.words.low = vec!["aaa".to_string()];
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnscramblableWord("aaa".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        let mut config = GameConfig::default();
        config.code_breaker.lengths.high = 11;
        assert_eq!(config.validate(), Err(ConfigError::CodeLength(11)));

        let mut config = GameConfig::default();
        config.memory_sequence.lengths.mid = 10;
        assert_eq!(config.validate(), Err(ConfigError::SequenceLength(10)));
    }

    #[test]
    fn rejects_empty_and_non_letter_words() {
        let mut config = GameConfig::default();
        config.word_guess.words.mid.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyWordList {
                game: "word guess",
                tier: Tier::Mid
            })
        );

        let mut config = GameConfig::default();
        config.word_guess.words.low = vec!["c0de".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWord { .. })
        ));
    }

    #[test]
    fn rejects_broken_level() {
        let mut config = GameConfig::default();
        config.sokoban.levels.mid = vec!["#####".to_string(), "# $ #".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Level {
                tier: Tier::Mid,
                ..
            })
        ));
    }

    #[test]
    fn pause_free_timing_keeps_race_limit() {
        let timing = TimingRule::default().without_pauses();
        assert_eq!(timing.card_reveal(), Duration::ZERO);
        assert_eq!(timing.memorize(), Duration::ZERO);
        assert_eq!(timing.race_limit(), Duration::from_secs(15));
    }
}
