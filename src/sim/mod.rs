//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod lane;
pub mod player;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::{autopilot_steer, lane_clearance};
pub use collision::{
    Motion, advance_obstacle, advance_obstacles, find_player_collision, player_hitbox,
    resolve_player_collision,
};
pub use difficulty::{Difficulty, DifficultyChange};
pub use lane::{RoadGeometry, lanes_adjacent};
pub use player::{Steer, steer_player};
pub use rect::Rect;
pub use spawn::{can_spawn_obstacle, safe_spawn_position, try_spawn};
pub use state::{Car, CarKind, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
