//! Obstacle spawning
//!
//! A candidate spawn is refused if any live obstacle in the same or a
//! neighbouring lane is vertically closer than the minimum gap, or if the
//! boxes overlap outright. Lanes are tried in a freshly shuffled order so no
//! lane is favoured over many spawns.

use glam::Vec2;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::lane::{RoadGeometry, lanes_adjacent};
use super::rect::Rect;
use super::state::{Car, CarKind, GameEvent, GameState};
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Whether a new obstacle may occupy `candidate`
pub fn can_spawn_obstacle(
    candidate: &Rect,
    obstacles: &[Car],
    min_distance: f32,
    road: &RoadGeometry,
) -> bool {
    let candidate_lane = road.lane_of(candidate.center().x);

    for obstacle in obstacles {
        if (candidate.min.y - obstacle.pos.y).abs() < min_distance
            && lanes_adjacent(candidate_lane, obstacle.lane(road))
        {
            return false;
        }
        if candidate.overlaps(&obstacle.rect()) {
            return false;
        }
    }

    true
}

/// First lane (in random order) whose centred spawn point is safe
pub fn safe_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    obstacles: &[Car],
    height: f32,
    min_distance: f32,
    road: &RoadGeometry,
    spawn_y: f32,
) -> Option<Vec2> {
    let mut lanes: [usize; LANE_COUNT] = [0, 1, 2];
    lanes.shuffle(rng);

    lanes.into_iter().find_map(|lane| {
        let x = road.lane_x(lane);
        let candidate = Rect::new(x, spawn_y, road.car_width, height);
        can_spawn_obstacle(&candidate, obstacles, min_distance, road).then(|| Vec2::new(x, spawn_y))
    })
}

/// Spawn an obstacle if the spawn timer has run out and a lane is free
pub fn try_spawn(state: &mut GameState, tuning: &Tuning) -> Option<GameEvent> {
    let since_last = state.elapsed_ms - state.last_obstacle_ms;
    if since_last <= f64::from(state.difficulty.obstacle_frequency_ms) {
        return None;
    }

    let road = tuning.road();
    let height = tuning
        .enemy_heights
        .choose(&mut state.rng)
        .copied()
        .unwrap_or(tuning.player_height);

    let Some(pos) = safe_spawn_position(
        &mut state.rng,
        &state.obstacles,
        height,
        state.difficulty.min_obstacle_distance,
        &road,
        tuning.spawn_y,
    ) else {
        log::trace!("No safe lane at {}ms, skipping spawn", state.elapsed_ms);
        return None;
    };

    let kind = CarKind::ENEMY_MODELS
        .choose(&mut state.rng)
        .copied()
        .unwrap_or(CarKind::Sedan);
    let base = state
        .rng
        .random_range(tuning.enemy_min_speed..=tuning.enemy_max_speed) as f32;
    let speed = base * state.difficulty.speed_boost;

    let id = state.next_entity_id();
    let car = Car::enemy(id, kind, pos, tuning.car_width, height, speed);
    let lane = car.lane(&road);
    log::debug!("Spawned {:?} #{} in lane {} at speed {:.1}", kind, id, lane, speed);

    state.obstacles.push(car);
    state.last_obstacle_ms = state.elapsed_ms;
    Some(GameEvent::Spawned { id, lane })
}
