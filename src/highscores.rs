//! High score storage
//!
//! A single best score kept as a plain-text integer. A missing or unreadable
//! file counts as 0, and a failed write is logged and dropped.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::persistence;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value, with errors surfaced
    pub fn load(&self) -> Result<u64> {
        let text = persistence::read_text(&self.path)?;
        Ok(text.trim().parse::<u64>()?)
    }

    /// Stored best score; 0 when the file is missing or corrupt
    pub fn read_high_score(&self) -> u64 {
        match self.load() {
            Ok(score) => score,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No high score at {}, starting from 0", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Persist `max(score, stored)` and return the best score
    pub fn write_high_score(&self, score: u64) -> u64 {
        let stored = self.read_high_score();
        if score <= stored {
            return stored;
        }

        match persistence::write_text(&self.path, &score.to_string()) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
        score
    }

    /// Whether `score` would beat the stored best
    pub fn is_new_best(&self, score: u64) -> bool {
        score > self.read_high_score()
    }
}
