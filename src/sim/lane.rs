//! Lane geometry
//!
//! The road is split into three equal lanes between `road_left` and
//! `road_right`. All mappings clamp; no input is ever rejected.

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// Road bounds and the lane width derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadGeometry {
    pub road_left: f32,
    pub road_right: f32,
    pub lane_width: f32,
    /// Width of every car; used to centre cars in lanes and clamp the player
    pub car_width: f32,
}

impl RoadGeometry {
    pub fn new(road_left: f32, road_right: f32, car_width: f32) -> Self {
        Self {
            road_left,
            road_right,
            lane_width: (road_right - road_left) / LANE_COUNT as f32,
            car_width,
        }
    }

    /// Lane index (0..=2) containing an x centre
    pub fn lane_of(&self, x_center: f32) -> usize {
        let relative = ((x_center - self.road_left) / self.lane_width).floor();
        relative.clamp(0.0, (LANE_COUNT - 1) as f32) as usize
    }

    /// Lane of a car whose left edge is at `x`
    #[inline]
    pub fn lane_of_car(&self, x: f32) -> usize {
        self.lane_of(x + self.car_width / 2.0)
    }

    /// X coordinate of a lane's centre line
    pub fn lane_center(&self, lane: usize) -> f32 {
        let lane = lane.min(LANE_COUNT - 1);
        self.road_left + lane as f32 * self.lane_width + self.lane_width / 2.0
    }

    /// Left edge that centres a car in `lane`
    #[inline]
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.lane_center(lane) - self.car_width / 2.0
    }

    /// Hard clamp of a car's left edge to the road
    #[inline]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.road_left, self.road_right - self.car_width)
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.road_right - self.car_width
    }
}

/// Same or neighbouring lane
#[inline]
pub fn lanes_adjacent(a: usize, b: usize) -> bool {
    a.abs_diff(b) <= 1
}
