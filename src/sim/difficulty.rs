//! Difficulty ratchet
//!
//! Spawn frequency and spacing only tighten as the score grows, each clamped
//! to a floor. Steps are counted in milestones (multiples of the interval),
//! so checking the same score twice never applies a step twice.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What changed when the score was applied
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DifficultyChange {
    /// New level, if at least one step was applied
    pub level_up: Option<u32>,
    /// New multiplier, if a boost was granted
    pub boost: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Milliseconds between spawn attempts
    pub obstacle_frequency_ms: f32,
    /// Minimum vertical gap for same/adjacent lane spawns
    pub min_obstacle_distance: f32,
    pub level: u32,
    /// Multiplier applied to newly spawned obstacle speeds
    pub speed_boost: f32,
    /// Ticks left before the boost wears off
    pub boost_ticks: u32,
    /// Difficulty milestones already applied
    milestones: u64,
    /// Boost milestones already granted
    boosts: u64,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_frequency_ms: tuning.start_obstacle_frequency_ms,
            min_obstacle_distance: tuning.start_min_obstacle_distance,
            level: 1,
            speed_boost: 1.0,
            boost_ticks: 0,
            milestones: 0,
            boosts: 0,
        }
    }

    /// Apply every milestone the score has crossed since the last call
    pub fn apply_score(&mut self, score: u64, tuning: &Tuning) -> DifficultyChange {
        let mut change = DifficultyChange::default();

        let reached = score / tuning.difficulty_interval;
        while self.milestones < reached {
            self.milestones += 1;
            self.obstacle_frequency_ms = (self.obstacle_frequency_ms
                - tuning.obstacle_frequency_step_ms)
                .max(tuning.obstacle_frequency_floor_ms);
            self.min_obstacle_distance = (self.min_obstacle_distance
                - tuning.min_obstacle_distance_step)
                .max(tuning.min_obstacle_distance_floor);
        }
        let level = (reached + 1) as u32;
        if level > self.level {
            self.level = level;
            change.level_up = Some(level);
            log::info!(
                "Level {}: spawn every {}ms, min gap {}",
                level,
                self.obstacle_frequency_ms,
                self.min_obstacle_distance
            );
        }

        let boosts = score / tuning.boost_interval;
        if boosts > self.boosts {
            self.boosts = boosts;
            self.speed_boost = (self.speed_boost + tuning.boost_step).min(tuning.boost_max);
            self.boost_ticks = tuning.boost_duration_ticks;
            change.boost = Some(self.speed_boost);
            log::info!("Speed boost x{:.1}", self.speed_boost);
        }

        change
    }

    /// Count down the active boost; it drops back to 1.0 when it runs out
    pub fn tick_boost(&mut self) {
        if self.boost_ticks > 0 {
            self.boost_ticks -= 1;
            if self.boost_ticks == 0 {
                self.speed_boost = 1.0;
            }
        }
    }
}
