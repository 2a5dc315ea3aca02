//! Player steering with acceleration, friction and body tilt

use super::lane::RoadGeometry;
use super::state::Car;
use crate::tuning::Tuning;

/// Net steering direction for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    Left,
    Right,
    #[default]
    Straight,
}

impl Steer {
    /// Holding both keys cancels out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::Straight,
        }
    }
}

/// Integrate one tick of lateral movement; x is hard-clamped to the road
pub fn steer_player(player: &mut Car, steer: Steer, road: &RoadGeometry, tuning: &Tuning) {
    let target_tilt = match steer {
        Steer::Left => {
            player.velocity_x =
                (player.velocity_x - tuning.player_acceleration).max(-tuning.player_max_speed);
            -tuning.steer_tilt
        }
        Steer::Right => {
            player.velocity_x =
                (player.velocity_x + tuning.player_acceleration).min(tuning.player_max_speed);
            tuning.steer_tilt
        }
        Steer::Straight => 0.0,
    };

    let x = player.pos.x + player.velocity_x;
    player.pos.x = road.clamp_x(x);
    if player.pos.x != x {
        // Ran into the road edge
        player.velocity_x = 0.0;
    }
    player.velocity_x *= tuning.player_friction;

    player.tilt += (target_tilt - player.tilt) * tuning.tilt_smoothing;
}
