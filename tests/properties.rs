use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use street_racer::Tuning;
use street_racer::consts::SIM_DT_MS;
use street_racer::sim::{
    Car, CarKind, GameEvent, GamePhase, GameState, Rect, TickInput, lanes_adjacent,
    safe_spawn_position, tick,
};

fn obstacle_strategy() -> impl Strategy<Value = (usize, f32, f32)> {
    (0usize..3, -400.0f32..600.0, prop::sample::select(vec![75.0f32, 80.0, 85.0]))
}

fn steering_strategy() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 200..1500)
}

fn started(seed: u64, tuning: &Tuning) -> GameState {
    let mut state = GameState::new(seed, tuning);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, tuning, &start, SIM_DT_MS);
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_spawn_never_overlaps_or_crowds(
        seed in any::<u64>(),
        existing in prop::collection::vec(obstacle_strategy(), 0..8),
        min_distance in 80.0f32..=120.0,
        height in prop::sample::select(vec![75.0f32, 80.0, 85.0]),
    ) {
        let tuning = Tuning::default();
        let road = tuning.road();
        let obstacles: Vec<Car> = existing
            .iter()
            .enumerate()
            .map(|(i, &(lane, y, h))| {
                Car::enemy(i as u32, CarKind::Sedan, Vec2::new(road.lane_x(lane), y), 45.0, h, 3.0)
            })
            .collect();

        let mut rng = Pcg32::seed_from_u64(seed);
        if let Some(pos) = safe_spawn_position(&mut rng, &obstacles, height, min_distance, &road, tuning.spawn_y) {
            let candidate = Rect::new(pos.x, pos.y, 45.0, height);
            let lane = road.lane_of_car(pos.x);
            for other in &obstacles {
                prop_assert!(!candidate.overlaps(&other.rect()));
                if lanes_adjacent(lane, other.lane(&road)) {
                    prop_assert!((pos.y - other.pos.y).abs() >= min_distance);
                }
            }
        }
    }

    #[test]
    fn prop_live_obstacles_never_overlap(seed in any::<u64>(), ticks in 1000usize..3000) {
        let tuning = Tuning::default();
        let mut state = started(seed, &tuning);
        let input = TickInput { autopilot: true, ..Default::default() };

        for _ in 0..ticks {
            let events = tick(&mut state, &tuning, &input, SIM_DT_MS);
            if !events.iter().any(|e| matches!(e, GameEvent::Spawned { .. })) {
                continue;
            }
            for (i, a) in state.obstacles.iter().enumerate() {
                for b in &state.obstacles[i + 1..] {
                    prop_assert!(!a.rect().overlaps(&b.rect()), "#{} overlaps #{}", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn prop_score_counts_passes(seed in any::<u64>(), steering in steering_strategy()) {
        let tuning = Tuning::default();
        let mut state = started(seed, &tuning);
        let mut passes = 0u64;

        for (left, right) in steering {
            let before = state.score;
            let input = TickInput { steer_left: left, steer_right: right, ..Default::default() };
            let events = tick(&mut state, &tuning, &input, SIM_DT_MS);

            let passed = events.iter().filter(|e| matches!(e, GameEvent::Passed { .. })).count() as u64;
            passes += passed;
            prop_assert!(state.score >= before);
            prop_assert_eq!(state.score, before + passed);
        }
        prop_assert_eq!(state.score, passes);
    }

    #[test]
    fn prop_difficulty_only_tightens(seed in any::<u64>(), steering in steering_strategy()) {
        let tuning = Tuning::default();
        let mut state = started(seed, &tuning);
        let mut frequency = state.difficulty.obstacle_frequency_ms;
        let mut distance = state.difficulty.min_obstacle_distance;

        for (left, right) in steering {
            let input = TickInput { steer_left: left, steer_right: right, autopilot: left && right, ..Default::default() };
            tick(&mut state, &tuning, &input, SIM_DT_MS);
            if state.phase == GamePhase::GameOver {
                break;
            }

            let d = &state.difficulty;
            prop_assert!(d.obstacle_frequency_ms <= frequency);
            prop_assert!(d.min_obstacle_distance <= distance);
            prop_assert!(d.obstacle_frequency_ms >= tuning.obstacle_frequency_floor_ms);
            prop_assert!(d.min_obstacle_distance >= tuning.min_obstacle_distance_floor);
            prop_assert_eq!(d.level as u64, state.score / tuning.difficulty_interval + 1);
            frequency = d.obstacle_frequency_ms;
            distance = d.min_obstacle_distance;
        }
    }

    #[test]
    fn prop_player_stays_on_road(seed in any::<u64>(), steering in steering_strategy()) {
        let tuning = Tuning::default();
        let road = tuning.road();
        let mut state = started(seed, &tuning);

        for (left, right) in steering {
            let input = TickInput { steer_left: left, steer_right: right, restart: true, ..Default::default() };
            tick(&mut state, &tuning, &input, SIM_DT_MS);
            prop_assert!(state.player.pos.x >= road.road_left);
            prop_assert!(state.player.pos.x <= road.road_right - tuning.car_width);
        }
    }

    #[test]
    fn prop_sustained_steer_hits_the_wall(ticks in 150usize..400, left in any::<bool>()) {
        let tuning = Tuning::default();
        let road = tuning.road();
        let mut state = started(1, &tuning);
        state.obstacles.clear();
        // Keep spawns away for the whole run
        state.difficulty.obstacle_frequency_ms = f32::MAX;

        let input = TickInput { steer_left: left, steer_right: !left, ..Default::default() };
        for _ in 0..ticks {
            tick(&mut state, &tuning, &input, SIM_DT_MS);
        }
        let wall = if left { road.road_left } else { road.max_x() };
        prop_assert_eq!(state.player.pos.x, wall);
    }
}

#[test]
fn difficulty_scenario_at_score_ten() {
    let tuning = Tuning::default();
    let mut state = started(3, &tuning);
    state.score = 10;
    state.difficulty.apply_score(10, &tuning);
    state.difficulty.apply_score(10, &tuning);
    assert_eq!(state.difficulty.obstacle_frequency_ms, 1900.0);
    assert_eq!(state.difficulty.min_obstacle_distance, 110.0);
    assert_eq!(state.level(), 2);
}
