use borderlands_core::{Card, RunError, RunState};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const SAVE_SCHEMA_VERSION: u32 = 1;
pub const SAVE_ENV: &str = "BORDERLANDS_SAVE";
pub const DEFAULT_SAVE_PATH: &str = "save_game.json";

/// Deck order and progress pointer as written to disk.
///
/// Older saves carry no version and name the pointer `current_card_index`; both
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSnapshot {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub deck: Vec<Card>,
    #[serde(alias = "current_card_index")]
    pub position: usize,
}

fn legacy_version() -> u32 {
    SAVE_SCHEMA_VERSION
}

impl SavedSnapshot {
    pub fn from_run(state: &RunState) -> Self {
        Self {
            version: SAVE_SCHEMA_VERSION,
            deck: state.deck().cards().to_vec(),
            position: state.position(),
        }
    }

    pub fn into_run(self) -> Result<RunState, SnapshotError> {
        if self.version != SAVE_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        Ok(RunState::resume(self.deck, self.position)?)
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no saved game at {}", .0.display())]
    Missing(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {0} (expected 1)")]
    UnsupportedVersion(u32),
    #[error("invalid save: {0}")]
    InvalidRun(#[from] RunError),
}

/// `--save` wins, then `BORDERLANDS_SAVE`, then `save_game.json` in the working directory.
pub fn resolve_save_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(SAVE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH))
}

pub fn save_snapshot(state: &RunState, path: &Path) -> Result<(), SnapshotError> {
    let body = serde_json::to_string_pretty(&SavedSnapshot::from_run(state))?;
    fs::write(path, body).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), position = state.position(), "run saved");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<SavedSnapshot, SnapshotError> {
    let body = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SnapshotError::Missing(path.to_path_buf()),
        _ => SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(serde_json::from_str(&body)?)
}

/// Reads and validates a save in one step.
pub fn load_run(path: &Path) -> Result<RunState, SnapshotError> {
    let state = load_snapshot(path)?.into_run()?;
    info!(path = %path.display(), position = state.position(), "run loaded");
    Ok(state)
}
