//! Data-driven game balance
//!
//! Every rule the simulation applies is a number in [`Tuning`]. The struct is
//! built once at startup (defaults, or a JSON file) and handed to the sim by
//! reference; nothing mutates it afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::persistence;
use crate::sim::RoadGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Window / road ===
    pub window_width: f32,
    pub window_height: f32,
    /// Left edge of the drivable road
    pub road_left: f32,
    /// Right edge of the drivable road
    pub road_right: f32,
    /// Road scroll speed (stripes move at base_speed + 1)
    pub base_speed: f32,

    // === Cars ===
    pub car_width: f32,
    pub player_height: f32,
    /// Heights an enemy car can roll at spawn
    pub enemy_heights: Vec<f32>,
    /// Player top edge at round start
    pub player_start_y: f32,
    /// Inclusive integer range for enemy speed, before the boost multiplier
    pub enemy_min_speed: u32,
    pub enemy_max_speed: u32,

    // === Player kinematics ===
    pub player_acceleration: f32,
    pub player_friction: f32,
    pub player_max_speed: f32,
    /// Tilt target in degrees while steering
    pub steer_tilt: f32,
    pub tilt_smoothing: f32,

    // === Spawning / movement ===
    /// Spawn row, above the visible area
    pub spawn_y: f32,
    /// Gap kept behind a slower car when following
    pub follow_margin: f32,
    /// A follower drops to this much below the leader's speed
    pub follow_speed_gap: f32,
    pub min_follow_speed: f32,
    /// Speed regained per unblocked tick
    pub speed_recovery: f32,
    /// Distance below the window before an obstacle counts as passed
    pub despawn_margin: f32,
    /// Player hitbox inset on every side
    pub hitbox_inset: f32,

    // === Round ===
    pub start_lives: u8,

    // === Difficulty ===
    /// Score interval between difficulty steps
    pub difficulty_interval: u64,
    pub start_obstacle_frequency_ms: f32,
    pub obstacle_frequency_step_ms: f32,
    pub obstacle_frequency_floor_ms: f32,
    pub start_min_obstacle_distance: f32,
    pub min_obstacle_distance_step: f32,
    pub min_obstacle_distance_floor: f32,
    /// Score interval between speed boosts
    pub boost_interval: u64,
    pub boost_step: f32,
    pub boost_max: f32,
    pub boost_duration_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
            road_left: 175.0,
            road_right: 575.0,
            base_speed: 5.0,

            car_width: 45.0,
            player_height: 80.0,
            enemy_heights: vec![75.0, 80.0, 85.0],
            player_start_y: 480.0,
            enemy_min_speed: 2,
            enemy_max_speed: 5,

            player_acceleration: 0.3,
            player_friction: 0.85,
            player_max_speed: 8.0,
            steer_tilt: 5.0,
            tilt_smoothing: 0.1,

            spawn_y: -100.0,
            follow_margin: 20.0,
            follow_speed_gap: 0.5,
            min_follow_speed: 1.0,
            speed_recovery: 0.1,
            despawn_margin: 50.0,
            hitbox_inset: 5.0,

            start_lives: 3,

            difficulty_interval: 10,
            start_obstacle_frequency_ms: 2000.0,
            obstacle_frequency_step_ms: 100.0,
            obstacle_frequency_floor_ms: 600.0,
            start_min_obstacle_distance: 120.0,
            min_obstacle_distance_step: 10.0,
            min_obstacle_distance_floor: 80.0,
            boost_interval: 50,
            boost_step: 0.2,
            boost_max: 2.0,
            boost_duration_ticks: 300,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tuning: Tuning = persistence::read_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot honour
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Err(Error::InvalidTuning(reason.to_string()));

        if self.road_left < 0.0 || self.road_right > self.window_width {
            return invalid("road must lie inside the window");
        }
        if self.road_right - self.road_left < 3.0 * self.car_width {
            return invalid("road must fit one car per lane");
        }
        if self.enemy_heights.is_empty() || self.enemy_heights.iter().any(|h| *h <= 0.0) {
            return invalid("enemy_heights must be non-empty and positive");
        }
        if self.enemy_min_speed == 0 || self.enemy_min_speed > self.enemy_max_speed {
            return invalid("enemy speed range must be non-empty and above zero");
        }
        if self.hitbox_inset * 2.0 >= self.car_width {
            return invalid("hitbox_inset leaves no hitbox");
        }
        if self.start_lives == 0 {
            return invalid("start_lives must be at least 1");
        }
        if self.difficulty_interval == 0 || self.boost_interval == 0 {
            return invalid("score intervals must be positive");
        }
        if self.obstacle_frequency_floor_ms > self.start_obstacle_frequency_ms
            || self.min_obstacle_distance_floor > self.start_min_obstacle_distance
        {
            return invalid("difficulty floors must not exceed start values");
        }
        if self.obstacle_frequency_step_ms < 0.0 || self.min_obstacle_distance_step < 0.0 {
            return invalid("difficulty steps must not ease the game");
        }
        Ok(())
    }

    /// Road geometry derived from the road bounds
    pub fn road(&self) -> RoadGeometry {
        RoadGeometry::new(self.road_left, self.road_right, self.car_width)
    }

    /// Player x at round start (centred in the window)
    pub fn player_start_x(&self) -> f32 {
        self.window_width / 2.0 - self.car_width / 2.0
    }

    /// Obstacles below this y are removed and scored
    pub fn despawn_y(&self) -> f32 {
        self.window_height + self.despawn_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "start_lives": 5 }"#).unwrap();
        assert_eq!(tuning.start_lives, 5);
        assert_eq!(tuning.road_left, 175.0);
        assert_eq!(tuning.enemy_heights, vec![75.0, 80.0, 85.0]);
    }

    #[test]
    fn test_rejects_narrow_road() {
        let tuning = Tuning {
            road_right: 250.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_floor_above_start() {
        let tuning = Tuning {
            obstacle_frequency_floor_ms: 3000.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("street_racer_no_such_tuning.json");
        assert!(matches!(Tuning::load(&path), Err(Error::Io(_))));
    }

    #[test]
    fn test_load_reads_and_validates_json() {
        let dir = std::env::temp_dir().join(format!("street_racer_tuning_{}", std::process::id()));
        let good = dir.join("good.json");
        persistence::write_text(&good, r#"{ "start_lives": 4 }"#).unwrap();
        assert_eq!(Tuning::load(&good).unwrap().start_lives, 4);

        let bad = dir.join("bad.json");
        persistence::write_text(&bad, r#"{ "enemy_heights": [] }"#).unwrap();
        assert!(matches!(Tuning::load(&bad), Err(Error::InvalidTuning(_))));

        let garbled = dir.join("garbled.json");
        persistence::write_text(&garbled, "{ lanes").unwrap();
        assert!(matches!(Tuning::load(&garbled), Err(Error::Json(_))));
    }
}
