//! Score board
//!
//! Persisted as a JSON array of records, rewritten in full on every save and
//! kept sorted by score, highest first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Difficulty, GameState};

/// Timestamp format stored with each record
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Failure writing the score board
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write scores to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode scores: {0}")]
    Encode(#[from] serde_json::Error),
}

fn default_name() -> String {
    "Anonymous".to_string()
}

/// A single finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: String,
    #[serde(default = "default_name")]
    pub name: String,
    pub score: u64,
    pub level: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Local date-time the session ended
    pub timestamp: String,
}

impl ScoreRecord {
    /// Build a record for the finished session, or `None` if it must not be recorded
    pub fn from_state(state: &GameState, timestamp: String) -> Option<Self> {
        if state.skipped || state.player_name.trim().is_empty() {
            return None;
        }
        Some(Self {
            player_id: state.player_id.clone(),
            name: state.player_name.trim().to_string(),
            score: state.score,
            level: state.level,
            difficulty: state.difficulty,
            timestamp,
        })
    }
}

/// Score board backed by a JSON file
#[derive(Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Empty board that will save to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the board. Missing or unreadable data yields an empty board; the
    /// next save overwrites whatever was there.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut scores = Self::new(path);

        let json = match fs::read_to_string(&scores.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                return scores;
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", scores.path.display(), e);
                return scores;
            }
        };

        match serde_json::from_str::<Vec<ScoreRecord>>(&json) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                log::info!("Loaded {} high scores", entries.len());
                scores.entries = entries;
            }
            Err(e) => {
                log::warn!(
                    "Discarding unreadable scores in {}: {}",
                    scores.path.display(),
                    e
                );
            }
        }
        scores
    }

    /// Write the full board, replacing the file atomically
    pub fn save(&self) -> Result<(), PersistError> {
        let io_err = |source: io::Error| PersistError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(e));
        }

        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Insert a record in score order. Ties keep earlier records ahead.
    /// Returns the 1-indexed rank.
    pub fn insert(&mut self, record: ScoreRecord) -> usize {
        let pos = self
            .entries
            .iter()
            .position(|e| record.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
        pos + 1
    }

    /// Record the finished session and save the whole board.
    ///
    /// Skipped sessions and blank names are not recorded: returns `Ok(None)`
    /// and leaves the stored board untouched.
    pub fn add_and_save(&mut self, state: &GameState) -> Result<Option<usize>, PersistError> {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let Some(record) = ScoreRecord::from_state(state, timestamp) else {
            log::debug!("Session not recorded (skipped or unnamed)");
            return Ok(None);
        };

        let rank = self.insert(record);
        self.save()?;
        Ok(Some(rank))
    }

    /// Get the rank a score would achieve (1-indexed)
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1
    }

    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Best record for a player name
    pub fn best_for(&self, name: &str) -> Option<&ScoreRecord> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
