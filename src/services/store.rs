//! JSON snapshot persistence for the board.
//!
//! The whole board is one document rewritten after every mutation. Writes go
//! through a temp file plus rename so a crash mid-write never leaves a
//! truncated snapshot behind.

use std::path::{Path, PathBuf};

use crate::board::state::BoardState;
use crate::error::AppResult;

pub const DEFAULT_SNAPSHOT_PATH: &str = "moodboard-state.json";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        let path = std::env::var("SNAPSHOT_PATH")
            .unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted board, or a fresh one when no snapshot exists.
    /// A corrupt snapshot is logged and replaced rather than blocking boot.
    pub async fn load(&self) -> BoardState {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No snapshot found, starting fresh");
                return BoardState::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Snapshot unreadable, starting fresh");
                return BoardState::default();
            }
        };

        match serde_json::from_slice::<BoardState>(&raw) {
            Ok(mut state) => {
                state.sanitize();
                state
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Snapshot corrupt, starting fresh");
                BoardState::default()
            }
        }
    }

    /// Persist the board atomically: write a sibling temp file, then rename
    /// over the snapshot.
    pub async fn save(&self, state: &BoardState) -> AppResult<()> {
        let payload = serde_json::to_vec_pretty(state)?;
        let temp = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp, &payload).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}
