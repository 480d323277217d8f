//! Box pushing on a fixed layout. Pushing a box into a wall or another box ends the
//! attempt on the spot.

use super::{EngineError, InputError, Minigame};
use crate::console::read_valid;
use crate::{ConfigError, Console, Event, GameConfig, Tier};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Ok(Direction::Up),
            "s" | "down" => Ok(Direction::Down),
            "a" | "left" => Ok(Direction::Left),
            "d" | "right" => Ok(Direction::Right),
            _ => Err(InputError::UnknownDirection),
        }
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Pushed,
    /// Walked into a wall or off the map; nothing changes.
    Blocked,
    /// Tried to push a box that cannot move.
    Stuck,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("layout is empty")]
    Empty,
    #[error("row {0} has a different width")]
    Ragged(usize),
    #[error("unknown tile {0:?}")]
    UnknownTile(char),
    #[error("expected exactly one player, found {0}")]
    Players(usize),
    #[error("layout has no targets")]
    NoTargets,
    #[error("{boxes} boxes cannot cover {targets} targets")]
    TooFewBoxes { boxes: usize, targets: usize },
}

type Pos = (usize, usize);

#[derive(Debug, Clone)]
pub struct Board {
    tiles: Vec<Vec<Tile>>,
    boxes: BTreeSet<Pos>,
    player: Pos,
}

impl Board {
    /// Reads XSB rows: `#` wall, ` ` floor, `.` target, `$` box, `*` box on target,
    /// `@` player, `+` player on target.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let width = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .filter(|width| *width > 0)
            .ok_or(LevelError::Empty)?;
        let mut tiles = Vec::with_capacity(rows.len());
        let mut boxes = BTreeSet::new();
        let mut players = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(LevelError::Ragged(r));
            }
            let mut line = Vec::with_capacity(width);
            for (c, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    ' ' | '$' | '@' => Tile::Floor,
                    '.' | '*' | '+' => Tile::Target,
                    other => return Err(LevelError::UnknownTile(other)),
                };
                if matches!(ch, '$' | '*') {
                    boxes.insert((r, c));
                }
                if matches!(ch, '@' | '+') {
                    players.push((r, c));
                }
                line.push(tile);
            }
            tiles.push(line);
        }
        let &[player] = players.as_slice() else {
            return Err(LevelError::Players(players.len()));
        };
        let targets = tiles.iter().flatten().filter(|tile| **tile == Tile::Target).count();
        if targets == 0 {
            return Err(LevelError::NoTargets);
        }
        if boxes.len() < targets {
            return Err(LevelError::TooFewBoxes {
                boxes: boxes.len(),
                targets,
            });
        }
        Ok(Self {
            tiles,
            boxes,
            player,
        })
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.contains(&pos)
    }

    fn tile(&self, (row, col): Pos) -> Tile {
        self.tiles[row][col]
    }

    fn offset(&self, (row, col): Pos, direction: Direction) -> Option<Pos> {
        let (dr, dc) = direction.delta();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        let line = self.tiles.get(row)?;
        (col < line.len()).then_some((row, col))
    }

    fn is_open(&self, pos: Pos) -> bool {
        self.tile(pos) != Tile::Wall && !self.has_box(pos)
    }

    pub fn step(&mut self, direction: Direction) -> Step {
        let Some(next) = self.offset(self.player, direction) else {
            return Step::Blocked;
        };
        if self.tile(next) == Tile::Wall {
            return Step::Blocked;
        }
        if !self.has_box(next) {
            self.player = next;
            return Step::Moved;
        }
        match self.offset(next, direction) {
            Some(beyond) if self.is_open(beyond) => {
                self.boxes.remove(&next);
                self.boxes.insert(beyond);
                self.player = next;
                Step::Pushed
            }
            _ => Step::Stuck,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(r, line)| {
            line.iter()
                .enumerate()
                .all(|(c, tile)| *tile != Tile::Target || self.has_box((r, c)))
        })
    }

    /// XSB rendering of the current position.
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(r, line)| {
                line.iter()
                    .enumerate()
                    .map(|(c, tile)| {
                        let pos = (r, c);
                        match (tile, self.has_box(pos), self.player == pos) {
                            (Tile::Wall, _, _) => '#',
                            (Tile::Floor, true, _) => '$',
                            (Tile::Target, true, _) => '*',
                            (Tile::Floor, false, true) => '@',
                            (Tile::Target, false, true) => '+',
                            (Tile::Floor, false, false) => ' ',
                            (Tile::Target, false, false) => '.',
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Sokoban {
    board: Board,
}

impl Sokoban {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn from_config(tier: Tier, config: &GameConfig) -> Result<Self, ConfigError> {
        let board = Board::parse(config.sokoban.levels.get(tier))
            .map_err(|source| ConfigError::Level { tier, source })?;
        Ok(Self::new(board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Minigame for Sokoban {
    fn attempt(&mut self, console: &mut dyn Console) -> Result<bool, EngineError> {
        debug!(boxes = self.board.boxes.len(), "sokoban level loaded");
        loop {
            console.emit(Event::SokobanBoard {
                rows: self.board.rows(),
            });
            if self.board.is_solved() {
                console.emit(Event::SokobanSolved);
                return Ok(true);
            }
            let direction = read_valid(console, "Move (w/a/s/d): ", Direction::parse)?;
            if self.board.step(direction) == Step::Stuck {
                console.emit(Event::SokobanStuck);
                return Ok(false);
            }
        }
    }
}
