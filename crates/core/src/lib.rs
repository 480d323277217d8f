//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod console;
pub mod deck;
pub mod events;
pub mod games;
pub mod rng;
pub mod run;
pub mod testing;

pub use cards::*;
pub use config::*;
pub use console::{Clock, Console, Display, LineInput, Poll};
pub use deck::*;
pub use events::*;
pub use games::{EngineError, Encounter, GameKind, InputError, Minigame, MinigameTable};
pub use rng::*;
pub use run::*;
pub use testing::ScriptedConsole;
