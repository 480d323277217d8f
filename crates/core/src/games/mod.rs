//! Minigame engines and the card-to-engine table.

pub mod code_breaker;
pub mod grid_memory;
pub mod lights_out;
pub mod memory_sequence;
pub mod rps;
pub mod sokoban;
pub mod word_guess;
pub mod word_race;

use crate::{
    Card, ConfigError, Console, Encounters, Event, GameConfig, Parity, RngState, Suit, Tier,
};
use code_breaker::CodeBreaker;
use grid_memory::GridMemory;
use lights_out::LightsOut;
use memory_sequence::MemorySequence;
use rps::RockPaperScissors;
use serde::{Deserialize, Serialize};
use sokoban::Sokoban;
use thiserror::Error;
use tracing::debug;
use word_guess::WordGuess;
use word_race::WordRace;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameKind {
    MemorySequence,
    GridMemory,
    WordGuess,
    WordRace,
    Sokoban,
    LightsOut,
    CodeBreaker,
    RockPaperScissors,
}

impl GameKind {
    /// The fixed (suit, rank parity) table.
    pub fn for_card(card: Card) -> Self {
        match (card.suit, card.rank.parity()) {
            (Suit::Hearts, Parity::Odd) => GameKind::WordGuess,
            (Suit::Hearts, Parity::Even) => GameKind::WordRace,
            (Suit::Diamonds, Parity::Odd) => GameKind::MemorySequence,
            (Suit::Diamonds, Parity::Even) => GameKind::GridMemory,
            (Suit::Clubs, Parity::Odd) => GameKind::RockPaperScissors,
            (Suit::Clubs, Parity::Even) => GameKind::CodeBreaker,
            (Suit::Spades, Parity::Odd) => GameKind::LightsOut,
            (Suit::Spades, Parity::Even) => GameKind::Sokoban,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::MemorySequence => "Number Memory",
            GameKind::GridMemory => "Color Grid Memory",
            GameKind::WordGuess => "Hangman",
            GameKind::WordRace => "Encrypted Door",
            GameKind::Sokoban => "Sokoban",
            GameKind::LightsOut => "Lights Out",
            GameKind::CodeBreaker => "Code Breaker",
            GameKind::RockPaperScissors => "Rock Paper Scissors",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("input closed")]
    InputClosed,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed player input. Reported and re-prompted; never consumes a budget.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputError {
    #[error("please enter valid numbers")]
    NotANumber,
    #[error("please enter exactly {expected} numbers")]
    WrongCount { expected: usize },
    #[error("please enter a single letter")]
    NotALetter,
    #[error("you already tried the letter '{0}'")]
    AlreadyGuessed(char),
    #[error("enter a row letter and a column number (e.g. A1 or 1A) on the {size}x{size} grid")]
    BadPosition { size: usize },
    #[error("enter a {expected}-digit code")]
    WrongLength { expected: usize },
    #[error("use only digits")]
    NotDigits,
    #[error("choose rock, paper or scissors")]
    UnknownMove,
    #[error("move with w/a/s/d")]
    UnknownDirection,
    #[error("press button 0, 1 or 2")]
    UnknownButton,
}

/// One encounter: `Ok(true)` when the player wins it.
pub trait Minigame {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError>;
}

/// Puzzle state for a single card, built fresh and dropped after its attempt.
#[derive(Debug, Clone)]
pub enum Encounter {
    MemorySequence(MemorySequence),
    GridMemory(GridMemory),
    WordGuess(WordGuess),
    WordRace(WordRace),
    Sokoban(Sokoban),
    LightsOut(LightsOut),
    CodeBreaker(CodeBreaker),
    RockPaperScissors(RockPaperScissors),
}

impl Encounter {
    pub fn build(
        kind: GameKind,
        tier: Tier,
        config: &GameConfig,
        rng: &mut RngState,
    ) -> Result<Self, ConfigError> {
        let encounter = match kind {
            GameKind::MemorySequence => {
                Encounter::MemorySequence(MemorySequence::from_config(tier, config, rng))
            }
            GameKind::GridMemory => Encounter::GridMemory(GridMemory::from_config(tier, config, rng)),
            GameKind::WordGuess => Encounter::WordGuess(WordGuess::from_config(tier, config, rng)?),
            GameKind::WordRace => Encounter::WordRace(WordRace::from_config(tier, config, rng)?),
            GameKind::Sokoban => Encounter::Sokoban(Sokoban::from_config(tier, config)?),
            GameKind::LightsOut => Encounter::LightsOut(LightsOut::from_config(tier, config, rng)),
            GameKind::CodeBreaker => {
                Encounter::CodeBreaker(CodeBreaker::from_config(tier, config, rng))
            }
            GameKind::RockPaperScissors => {
                Encounter::RockPaperScissors(RockPaperScissors::from_config(tier, config, rng))
            }
        };
        Ok(encounter)
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Encounter::MemorySequence(_) => GameKind::MemorySequence,
            Encounter::GridMemory(_) => GameKind::GridMemory,
            Encounter::WordGuess(_) => GameKind::WordGuess,
            Encounter::WordRace(_) => GameKind::WordRace,
            Encounter::Sokoban(_) => GameKind::Sokoban,
            Encounter::LightsOut(_) => GameKind::LightsOut,
            Encounter::CodeBreaker(_) => GameKind::CodeBreaker,
            Encounter::RockPaperScissors(_) => GameKind::RockPaperScissors,
        }
    }
}

impl Minigame for Encounter {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        match self {
            Encounter::MemorySequence(game) => game.attempt(console),
            Encounter::GridMemory(game) => game.attempt(console),
            Encounter::WordGuess(game) => game.attempt(console),
            Encounter::WordRace(game) => game.attempt(console),
            Encounter::Sokoban(game) => game.attempt(console),
            Encounter::LightsOut(game) => game.attempt(console),
            Encounter::CodeBreaker(game) => game.attempt(console),
            Encounter::RockPaperScissors(game) => game.attempt(console),
        }
    }
}

/// The standard [`Encounters`] source: looks the card up and runs a fresh engine.
pub struct MinigameTable<'a> {
    config: &'a GameConfig,
    rng: &'a mut RngState,
}

impl<'a> MinigameTable<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a mut RngState) -> Self {
        Self { config, rng }
    }
}

impl Encounters for MinigameTable<'_> {
    fn play_card(&mut self, card: Card, console: &mut dyn Console) -> Result<bool, EngineError> {
        let kind = GameKind::for_card(card);
        let mut encounter = Encounter::build(kind, card.rank.tier(), self.config, self.rng)?;
        debug!(%card, ?kind, "encounter built");
        console.emit(Event::GameStarted { kind });
        let won = encounter.attempt(console)?;
        console.emit(Event::GameFinished { kind, won });
        Ok(won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, Rank};

    #[test]
    fn every_suit_splits_into_two_engines() {
        let deck = Deck::standard24();
        for suit in Suit::ALL {
            let odd: Vec<GameKind> = deck
                .cards()
                .iter()
                .filter(|card| card.suit == suit && card.rank.parity() == Parity::Odd)
                .map(|card| GameKind::for_card(*card))
                .collect();
            let even: Vec<GameKind> = deck
                .cards()
                .iter()
                .filter(|card| card.suit == suit && card.rank.parity() == Parity::Even)
                .map(|card| GameKind::for_card(*card))
                .collect();
            assert_eq!(odd.len(), 3);
            assert_eq!(even.len(), 3);
            assert!(odd.iter().all(|kind| *kind == odd[0]));
            assert!(even.iter().all(|kind| *kind == even[0]));
            assert_ne!(odd[0], even[0]);
        }
    }

    #[test]
    fn table_matches_suit_families() {
        let cases = [
            (Suit::Hearts, Rank::Ace, GameKind::WordGuess),
            (Suit::Hearts, Rank::Six, GameKind::WordRace),
            (Suit::Diamonds, Rank::Three, GameKind::MemorySequence),
            (Suit::Diamonds, Rank::Two, GameKind::GridMemory),
            (Suit::Clubs, Rank::Five, GameKind::RockPaperScissors),
            (Suit::Clubs, Rank::Four, GameKind::CodeBreaker),
            (Suit::Spades, Rank::Ace, GameKind::LightsOut),
            (Suit::Spades, Rank::Two, GameKind::Sokoban),
        ];
        for (suit, rank, expected) in cases {
            assert_eq!(GameKind::for_card(Card::new(suit, rank)), expected);
        }
    }

    #[test]
    fn build_honours_kind_for_every_card() {
        let config = GameConfig::default();
        let mut rng = RngState::from_seed(3);
        for card in Deck::standard24().cards() {
            let kind = GameKind::for_card(*card);
            let encounter =
                Encounter::build(kind, card.rank.tier(), &config, &mut rng).expect("build");
            assert_eq!(encounter.kind(), kind);
        }
    }

    #[test]
    fn build_reports_empty_word_list() {
        let mut config = GameConfig::default();
        config.word_guess.words.high.clear();
        let mut rng = RngState::from_seed(3);
        let err = Encounter::build(GameKind::WordGuess, Tier::High, &config, &mut rng)
            .expect_err("empty list");
        assert_eq!(
            err,
            ConfigError::EmptyWordList {
                game: "word guess",
                tier: Tier::High
            }
        );
    }
}
