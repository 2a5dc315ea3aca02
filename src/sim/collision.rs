//! Obstacle movement and collision resolution
//!
//! Enemy cars never pass through each other: a car that would run into a
//! slower car ahead tucks in behind it and brakes, then recovers its speed
//! once the road clears. The player is hit-tested with a hitbox inset from
//! the sprite so grazes are forgiven.

use super::rect::Rect;
use super::state::{Car, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// How an obstacle's tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Moved forward by its speed
    Advanced,
    /// Clamped behind the car with this id
    Following { leader: u32 },
    /// Held back by the player's car
    BlockedByPlayer,
}

/// Advance one obstacle, braking behind anything it would run into
///
/// Cars earlier in the slice have already moved this tick; this one sees
/// their updated positions.
pub fn advance_obstacle(obstacles: &mut [Car], index: usize, player: &Rect, tuning: &Tuning) -> Motion {
    let car = &obstacles[index];
    let car_y = car.pos.y;
    let candidate_y = car_y + car.speed;
    let candidate = car.rect_at_y(candidate_y);

    // Only a car at or below us counts as a leader
    let leader = obstacles
        .iter()
        .enumerate()
        .find(|(j, other)| *j != index && car_y <= other.pos.y && candidate.overlaps(&other.rect()))
        .map(|(_, other)| (other.id, other.pos.y, other.speed));
    let hits_player = candidate.overlaps(player);

    let car = &mut obstacles[index];
    if let Some((leader, leader_y, leader_speed)) = leader {
        car.follow(leader_y, leader_speed, tuning);
        return Motion::Following { leader };
    }
    if hits_player {
        car.braking = true;
        return Motion::BlockedByPlayer;
    }

    car.pos.y = candidate_y;
    car.braking = false;
    car.recover_speed(tuning.speed_recovery);
    Motion::Advanced
}

/// Move every obstacle, then remove and score the ones that left the screen
pub fn advance_obstacles(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    let player = state.player.rect();
    for index in 0..state.obstacles.len() {
        let motion = advance_obstacle(&mut state.obstacles, index, &player, tuning);
        if motion != Motion::Advanced {
            log::trace!("Car #{} {:?}", state.obstacles[index].id, motion);
        }
    }

    let despawn_y = tuning.despawn_y();
    let before = state.obstacles.len();
    state.obstacles.retain(|car| car.pos.y <= despawn_y);
    let passed = before - state.obstacles.len();

    (0..passed)
        .map(|_| {
            state.score += 1;
            GameEvent::Passed { score: state.score }
        })
        .collect()
}

/// The forgiving collision volume of the player
#[inline]
pub fn player_hitbox(player: &Car, inset: f32) -> Rect {
    player.rect().inset(inset)
}

/// Index of the first obstacle touching the hitbox
pub fn find_player_collision(hitbox: &Rect, obstacles: &[Car]) -> Option<usize> {
    obstacles.iter().position(|car| hitbox.overlaps(&car.rect()))
}

/// Handle at most one crash this tick: lose a life, or end the round
pub fn resolve_player_collision(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    let hitbox = player_hitbox(&state.player, tuning.hitbox_inset);
    let Some(index) = find_player_collision(&hitbox, &state.obstacles) else {
        return Vec::new();
    };

    state.lives = state.lives.saturating_sub(1);
    let mut events = vec![GameEvent::Crashed {
        lives_left: state.lives,
    }];

    if state.lives == 0 {
        log::info!("Game over with score {}", state.score);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
    } else {
        let car = state.obstacles.remove(index);
        log::debug!("Crashed into #{}, {} lives left", car.id, state.lives);
        state.recenter_player(tuning);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CarKind;
    use glam::Vec2;

    fn enemy(id: u32, x: f32, y: f32, speed: f32) -> Car {
        Car::enemy(id, CarKind::Sedan, Vec2::new(x, y), 45.0, 80.0, speed)
    }

    fn far_player() -> Rect {
        Rect::new(0.0, 10_000.0, 45.0, 80.0)
    }

    #[test]
    fn test_free_car_advances() {
        let tuning = Tuning::default();
        let mut cars = vec![enemy(1, 200.0, 100.0, 3.0)];
        let motion = advance_obstacle(&mut cars, 0, &far_player(), &tuning);
        assert_eq!(motion, Motion::Advanced);
        assert_eq!(cars[0].pos.y, 103.0);
        assert!(!cars[0].braking);
    }

    #[test]
    fn test_follower_clamps_behind_slower_car() {
        let tuning = Tuning::default();
        let mut cars = vec![enemy(1, 200.0, 300.0, 5.0), enemy(2, 200.0, 340.0, 2.0)];
        let motion = advance_obstacle(&mut cars, 0, &far_player(), &tuning);

        assert_eq!(motion, Motion::Following { leader: 2 });
        assert_eq!(cars[0].pos.y, 340.0 - (80.0 + 20.0));
        assert_eq!(cars[0].speed, 1.5);
        assert_eq!(cars[0].original_speed, 5.0);
        assert!(cars[0].braking);
        assert_eq!(cars.len(), 2);
    }

    #[test]
    fn test_leader_ignores_car_behind() {
        let tuning = Tuning::default();
        let mut cars = vec![enemy(1, 200.0, 300.0, 2.0), enemy(2, 200.0, 230.0, 5.0)];
        let motion = advance_obstacle(&mut cars, 0, &far_player(), &tuning);
        assert_eq!(motion, Motion::Advanced);
        assert_eq!(cars[0].pos.y, 302.0);
    }

    #[test]
    fn test_blocked_by_player_keeps_speed() {
        let tuning = Tuning::default();
        let mut cars = vec![enemy(1, 200.0, 396.0, 5.0)];
        let player = Rect::new(200.0, 480.0, 45.0, 80.0);
        let motion = advance_obstacle(&mut cars, 0, &player, &tuning);
        assert_eq!(motion, Motion::BlockedByPlayer);
        assert_eq!(cars[0].pos.y, 396.0);
        assert_eq!(cars[0].speed, 5.0);
        assert!(cars[0].braking);
    }

    #[test]
    fn test_speed_recovers_when_clear() {
        let tuning = Tuning::default();
        let mut cars = vec![enemy(1, 200.0, 0.0, 4.0)];
        cars[0].speed = 2.0;
        advance_obstacle(&mut cars, 0, &far_player(), &tuning);
        assert!((cars[0].speed - 2.1).abs() < 1e-5);
        for _ in 0..100 {
            advance_obstacle(&mut cars, 0, &far_player(), &tuning);
        }
        assert_eq!(cars[0].speed, 4.0);
    }

    #[test]
    fn test_passed_obstacles_score_once_each() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Playing;
        state.obstacles = vec![enemy(1, 220.0, 648.0, 3.0), enemy(2, 490.0, 649.0, 3.0), enemy(3, 355.0, 0.0, 3.0)];

        let events = advance_obstacles(&mut state, &tuning);
        assert_eq!(events, vec![GameEvent::Passed { score: 1 }, GameEvent::Passed { score: 2 }]);
        assert_eq!(state.score, 2);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 3);
    }

    #[test]
    fn test_hitbox_forgives_grazes() {
        let player = Car::player(0, &Tuning::default());
        let hitbox = player_hitbox(&player, 5.0);
        // Overlaps the sprite by 3px on the right edge, misses the hitbox
        let graze = enemy(1, player.pos.x + 42.0, player.pos.y, 3.0);
        assert!(player.rect().overlaps(&graze.rect()));
        assert_eq!(find_player_collision(&hitbox, &[graze]), None);

        let hit = enemy(2, player.pos.x + 20.0, player.pos.y, 3.0);
        assert_eq!(find_player_collision(&hitbox, &[hit]), Some(0));
    }

    #[test]
    fn test_crash_costs_a_life_and_recenters() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Playing;
        state.player.pos.x = 200.0;
        state.player.velocity_x = -4.0;
        state.obstacles = vec![enemy(1, 210.0, 470.0, 3.0)];

        let events = resolve_player_collision(&mut state, &tuning);
        assert_eq!(events, vec![GameEvent::Crashed { lives_left: 2 }]);
        assert_eq!(state.lives, 2);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos.x, tuning.player_start_x());
        assert_eq!(state.player.velocity_x, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_round() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Playing;
        state.lives = 1;
        state.score = 17;
        let x = state.player.pos.x;
        state.obstacles = vec![enemy(1, x, 470.0, 3.0)];

        let events = resolve_player_collision(&mut state, &tuning);
        assert_eq!(
            events,
            vec![GameEvent::Crashed { lives_left: 0 }, GameEvent::GameOver { score: 17 }]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
