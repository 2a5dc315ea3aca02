//! Audio collaborators
//!
//! The game only ever fires sounds and forgets them. Playback itself belongs
//! to whatever backend implements [`AudioSink`]; failures never reach the
//! simulation.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::sim::GameEvent;

/// Folder scanned for background music
pub const MUSIC_FOLDER: &str = "music";

/// Extensions accepted as music tracks
const MUSIC_EXTENSIONS: [&str; 3] = ["mp3", "wav", "ogg"];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Obstacle passed
    Score,
    /// Player hit an obstacle
    Crash,
    /// Difficulty stepped up
    LevelUp,
    /// Speed boost granted
    Boost,
    /// Round ended
    GameOver,
}

impl SoundEffect {
    /// Sound for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Passed { .. } => Some(SoundEffect::Score),
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::SpeedBoost { .. } => Some(SoundEffect::Boost),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Mix level relative to the effects volume
    pub fn relative_volume(&self) -> f32 {
        match self {
            SoundEffect::Score => 0.3,
            SoundEffect::Crash => 0.7,
            SoundEffect::LevelUp | SoundEffect::Boost => 0.5,
            SoundEffect::GameOver => 0.8,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Drops every sound
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Logs sounds instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("♪ {:?} at {:.2}", effect, volume);
    }
}

/// Pick a random track from `folder`
///
/// A missing folder is created so the player knows where to put music. Any
/// failure returns `None`; the game simply runs without music.
pub fn find_music<R: Rng + ?Sized>(folder: &Path, rng: &mut R) -> Option<PathBuf> {
    if !folder.exists() {
        match fs::create_dir_all(folder) {
            Ok(()) => log::info!("Created '{}' folder. Add music files there.", folder.display()),
            Err(e) => log::warn!("Could not create '{}': {}", folder.display(), e),
        }
        return None;
    }

    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Error loading music: {}", e);
            return None;
        }
    };

    let mut tracks: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| MUSIC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    tracks.sort();

    if tracks.is_empty() {
        log::info!("No music files found in '{}'", folder.display());
    }
    tracks.choose(rng).cloned()
}
