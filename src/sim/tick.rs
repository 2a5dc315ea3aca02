//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::autopilot::autopilot_steer;
use super::collision::{advance_obstacles, resolve_player_collision};
use super::player::{Steer, steer_player};
use super::spawn::try_spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::ROAD_STRIPE_SPACING;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer left held
    pub steer_left: bool,
    /// Steer right held
    pub steer_right: bool,
    /// Start from the menu / resume from pause
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// New round after game over
    pub restart: bool,
    /// Demo mode - the autopilot drives and restarts rounds
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, tuning: &Tuning, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Menu => {
            if input.start || input.autopilot {
                state.reset_round(tuning);
                events.push(GameEvent::Started);
                log::info!("Round started (seed {})", state.seed);
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
        }
        GamePhase::Paused => {
            if input.pause || input.start {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
        }
        GamePhase::GameOver => {
            if input.restart || input.autopilot {
                state.reset_round(tuning);
                events.push(GameEvent::Started);
                log::info!("Round restarted");
            }
        }
    }

    // Only active play advances the simulation
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.elapsed_ms += f64::from(dt_ms);
    state.difficulty.tick_boost();

    // Player
    let steer = if input.autopilot {
        autopilot_steer(state, tuning)
    } else {
        Steer::from_keys(input.steer_left, input.steer_right)
    };
    steer_player(&mut state.player, steer, &tuning.road(), tuning);

    // Spawning
    events.extend(try_spawn(state, tuning));

    // Obstacles, scoring and difficulty
    let passed = advance_obstacles(state, tuning);
    if !passed.is_empty() {
        events.extend(passed);
        let change = state.difficulty.apply_score(state.score, tuning);
        if let Some(level) = change.level_up {
            events.push(GameEvent::LevelUp { level });
        }
        if let Some(multiplier) = change.boost {
            events.push(GameEvent::SpeedBoost { multiplier });
        }
    }

    // Crashes
    events.extend(resolve_player_collision(state, tuning));

    state.road_scroll = (state.road_scroll + tuning.base_speed + 1.0) % ROAD_STRIPE_SPACING;

    // Ensure deterministic ordering
    state.normalize_order();

    events
}
