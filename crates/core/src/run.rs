use crate::{Card, Console, Deck, EngineError, Event, GameKind, RngState};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("deck must hold each of the 24 cards exactly once")]
    InvalidDeck,
    #[error("position {0} is past the end of the deck")]
    PositionOutOfRange(usize),
    #[error("run already finished")]
    Finished,
}

/// Deck order plus the number of cards already cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    deck: Deck,
    position: usize,
}

impl RunState {
    pub fn new(deck: Deck) -> Self {
        Self { deck, position: 0 }
    }

    pub fn shuffled(rng: &mut RngState) -> Self {
        Self::new(Deck::shuffled(rng))
    }

    /// Rebuilds a paused run, checking deck composition and the pointer.
    pub fn resume(cards: Vec<Card>, position: usize) -> Result<Self, RunError> {
        let deck = Deck::from_cards(cards).ok_or(RunError::InvalidDeck)?;
        if position > deck.len() {
            return Err(RunError::PositionOutOfRange(position));
        }
        Ok(Self { deck, position })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_card(&self) -> Option<Card> {
        self.deck.get(self.position)
    }

    pub fn cleared(&self) -> &[Card] {
        &self.deck.cards()[..self.position]
    }

    pub fn remaining(&self) -> &[Card] {
        &self.deck.cards()[self.position..]
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.deck.len()
    }

    /// Marks the current card cleared and returns it.
    pub fn advance(&mut self) -> Result<Card, RunError> {
        let card = self.current_card().ok_or(RunError::Finished)?;
        self.position += 1;
        Ok(card)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Won,
    Lost(Card),
    /// Input ended or an encounter could not be built; the position is untouched.
    Aborted,
}

/// Plays the encounter behind one card.
pub trait Encounters {
    fn play_card(&mut self, card: Card, console: &mut dyn Console) -> Result<bool, EngineError>;
}

/// Offered the state after every cleared card except the last. The console is lent
/// so an interactive checkpoint can ask before saving.
pub trait Checkpoint {
    fn card_cleared(&mut self, state: &RunState, console: &mut dyn Console);
}

impl Checkpoint for () {
    fn card_cleared(&mut self, _state: &RunState, _console: &mut dyn Console) {}
}

pub fn run_game(
    state: &mut RunState,
    encounters: &mut dyn Encounters,
    console: &mut dyn Console,
    checkpoint: &mut dyn Checkpoint,
    reveal: Duration,
) -> RunOutcome {
    info!(position = state.position(), "run started");
    console.emit(Event::RunStarted {
        position: state.position(),
        total: state.deck.len(),
    });

    while let Some(card) = state.current_card() {
        let position = state.position();
        let kind = GameKind::for_card(card);
        console.emit(Event::CardDrawn {
            card,
            position,
            kind,
        });
        console.sleep(reveal);

        match encounters.play_card(card, console) {
            Ok(true) => {
                if let Err(err) = state.advance() {
                    warn!(%err, "cleared card could not advance the run");
                    return RunOutcome::Aborted;
                }
                info!(%card, position, "card cleared");
                console.emit(Event::CardCleared { card, position });
                if !state.is_complete() {
                    checkpoint.card_cleared(state, console);
                }
            }
            Ok(false) => {
                info!(%card, position, "run lost");
                console.emit(Event::RunLost { card, position });
                return RunOutcome::Lost(card);
            }
            Err(EngineError::InputClosed) => {
                info!(position, "input closed, run aborted");
                return RunOutcome::Aborted;
            }
            Err(EngineError::Config(err)) => {
                warn!(%card, %err, "encounter could not be built");
                return RunOutcome::Aborted;
            }
        }
    }

    info!("run won");
    console.emit(Event::RunWon {
        cards: state.deck.len(),
    });
    RunOutcome::Won
}
