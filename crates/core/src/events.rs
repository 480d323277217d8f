use crate::games::code_breaker::Mark;
use crate::games::grid_memory::{Cell, Color};
use crate::games::rps::{Move, RoundResult};
use crate::{Card, GameKind, InputError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RunStarted {
        position: usize,
        total: usize,
    },
    CardDrawn {
        card: Card,
        position: usize,
        kind: GameKind,
    },
    CardCleared {
        card: Card,
        position: usize,
    },
    RunWon {
        cards: usize,
    },
    RunLost {
        card: Card,
        position: usize,
    },
    RunSaved {
        position: usize,
    },
    SaveFailed {
        reason: String,
    },
    GameStarted {
        kind: GameKind,
    },
    GameFinished {
        kind: GameKind,
        won: bool,
    },
    Rejected {
        error: InputError,
    },
    Countdown {
        remaining: Duration,
    },
    SequenceShown {
        digits: Vec<u8>,
    },
    SequenceHidden {
        length: usize,
    },
    SequenceChecked {
        expected: Vec<u8>,
        correct: bool,
    },
    GridShown {
        size: usize,
        marks: Vec<(Color, Cell)>,
    },
    GridHidden {
        size: usize,
    },
    ColorChecked {
        color: Color,
        guess: Cell,
        actual: Cell,
    },
    GridScored {
        correct: usize,
        total: usize,
    },
    WordProgress {
        masked: String,
        remaining: u8,
        guessed: Vec<char>,
    },
    WordRevealed {
        word: String,
        solved: bool,
    },
    RaceReady {
        limit: Duration,
    },
    RaceStarted {
        scrambled: String,
    },
    RaceMissed {
        guess: String,
    },
    RaceSolved {
        word: String,
    },
    RaceTimeUp {
        word: String,
    },
    SokobanBoard {
        rows: Vec<String>,
    },
    SokobanStuck,
    SokobanSolved,
    LightsBoard {
        lights: [bool; 3],
        steps_left: u8,
    },
    LightsResult {
        solved: bool,
    },
    CodeStarted {
        length: usize,
        attempts: usize,
    },
    CodeFeedback {
        attempt: usize,
        guess: Vec<u8>,
        marks: Vec<Mark>,
    },
    CodeResult {
        code: Vec<u8>,
        cracked: bool,
    },
    RpsStarted {
        target: u8,
    },
    RpsRound {
        player: Move,
        opponent: Move,
        result: RoundResult,
        player_score: u8,
        opponent_score: u8,
        target: u8,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }
}
