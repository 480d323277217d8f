use super::{EngineError, InputError, Minigame};
use crate::console::read_valid;
use crate::{Console, Event, GameConfig, RngState, Tier};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn parse(input: &str) -> Result<Self, InputError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(InputError::UnknownMove),
        }
    }

    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }

    /// The move that beats `self`.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Loss,
    Tie,
}

pub fn judge(player: Move, opponent: Move) -> RoundResult {
    if player == opponent {
        RoundResult::Tie
    } else if player.beats(opponent) {
        RoundResult::Win
    } else {
        RoundResult::Loss
    }
}

/// Counters a move the player has just repeated; otherwise picks at random.
pub fn opponent_move(history: &[Move], rng: &mut RngState) -> Move {
    match history {
        [.., previous, last] if previous == last => last.counter(),
        _ => Move::ALL[rng.index(Move::ALL.len())],
    }
}

/// First to `target` round wins; the player must come out ahead.
#[derive(Debug, Clone)]
pub struct RockPaperScissors {
    target: u8,
    history: Vec<Move>,
    player_score: u8,
    opponent_score: u8,
    rng: RngState,
}

impl RockPaperScissors {
    pub fn new(target: u8, rng: RngState) -> Self {
        Self {
            target,
            history: Vec::new(),
            player_score: 0,
            opponent_score: 0,
            rng,
        }
    }

    pub fn from_config(tier: Tier, config: &GameConfig, rng: &mut RngState) -> Self {
        Self::new(*config.rps.wins.get(tier), RngState::from_seed(rng.next_u64()))
    }

    pub fn scores(&self) -> (u8, u8) {
        (self.player_score, self.opponent_score)
    }

    pub fn is_over(&self) -> bool {
        self.player_score >= self.target || self.opponent_score >= self.target
    }

    /// Plays one round; the opponent commits before seeing `player`.
    pub fn play_round(&mut self, player: Move) -> (Move, RoundResult) {
        let opponent = opponent_move(&self.history, &mut self.rng);
        self.history.push(player);
        let result = judge(player, opponent);
        match result {
            RoundResult::Win => self.player_score += 1,
            RoundResult::Loss => self.opponent_score += 1,
            RoundResult::Tie => {}
        }
        (opponent, result)
    }
}

impl Minigame for RockPaperScissors {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(target = self.target, "rock paper scissors match");
        console.emit(Event::RpsStarted {
            target: self.target,
        });
        while !self.is_over() {
            let player = read_valid(console, "Choose rock, paper or scissors: ", Move::parse)?;
            let (opponent, result) = self.play_round(player);
            console.emit(Event::RpsRound {
                player,
                opponent,
                result,
                player_score: self.player_score,
                opponent_score: self.opponent_score,
                target: self.target,
            });
        }
        Ok(self.player_score > self.opponent_score)
    }
}
