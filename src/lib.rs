//! Street Racer - a three-lane arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, following, difficulty)
//! - `tuning`: Data-driven game balance
//! - `platform`: Clock/input/renderer abstraction
//! - `persistence`: Plain-file storage helpers
//! - `session`: Fixed-timestep driver wiring the sim to its collaborators

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::HighScoreStore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f32 = 1000.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the session (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Number of lanes on the road
    pub const LANE_COUNT: usize = 3;
    /// Distance between lane divider stripes
    pub const ROAD_STRIPE_SPACING: f32 = 80.0;
}
