//! Demo-mode driver
//!
//! Picks the lane with the most open road ahead of the player and steers
//! toward its centre, easing off early enough that friction settles the car.

use super::player::Steer;
use super::state::GameState;
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Close enough to the lane centre to stop steering (px)
const DEAD_ZONE: f32 = 4.0;

/// Open road above the player in each lane (infinite when empty)
pub fn lane_clearance(state: &GameState, tuning: &Tuning) -> [f32; LANE_COUNT] {
    let road = tuning.road();
    let player = &state.player;
    let player_bottom = player.pos.y + player.height;

    let mut clearance = [f32::INFINITY; LANE_COUNT];
    for car in state.obstacles.iter().filter(|c| c.pos.y < player_bottom) {
        let lane = car.lane(&road);
        let gap = player.pos.y - (car.pos.y + car.height);
        clearance[lane] = clearance[lane].min(gap);
    }
    clearance
}

/// Steering that heads for the clearest lane; ties keep the current lane
pub fn autopilot_steer(state: &GameState, tuning: &Tuning) -> Steer {
    let road = tuning.road();
    let player = &state.player;
    let clearance = lane_clearance(state, tuning);

    let current = player.lane(&road);
    let mut best = current;
    for lane in 0..LANE_COUNT {
        if clearance[lane] > clearance[best] {
            best = lane;
        }
    }

    let offset = road.lane_x(best) - player.pos.x;
    let friction = tuning.player_friction;
    let coast = player.velocity_x.abs() * friction / (1.0 - friction).max(f32::EPSILON);
    let heading_there = offset.signum() == player.velocity_x.signum();

    if offset.abs() <= DEAD_ZONE || (heading_there && offset.abs() <= coast) {
        Steer::Straight
    } else if offset < 0.0 {
        Steer::Left
    } else {
        Steer::Right
    }
}
