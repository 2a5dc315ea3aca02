//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::lane::RoadGeometry;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused (rendered, not updated)
    Paused,
    /// Round ended
    GameOver,
}

/// Player car or one of the enemy models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarKind {
    Player,
    Sedan,
    Truck,
    Suv,
}

impl CarKind {
    pub const ENEMY_MODELS: [CarKind; 3] = [CarKind::Sedan, CarKind::Truck, CarKind::Suv];
}

/// Things that happened during a tick, for audio/HUD/persistence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Spawned { id: u32, lane: usize },
    Passed { score: u64 },
    LevelUp { level: u32 },
    SpeedBoost { multiplier: f32 },
    Crashed { lives_left: u8 },
    GameOver { score: u64 },
}

/// A car on the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub kind: CarKind,
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Current forward speed (px/tick)
    pub speed: f32,
    /// Nominal speed; recovery target after following
    pub original_speed: f32,
    /// Lateral velocity (player only)
    #[serde(default)]
    pub velocity_x: f32,
    /// Body tilt in degrees (player only, cosmetic)
    #[serde(default)]
    pub tilt: f32,
    /// Brake lights on
    #[serde(default)]
    pub braking: bool,
}

impl Car {
    /// Player car at its start position
    pub fn player(id: u32, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: CarKind::Player,
            pos: Vec2::new(tuning.player_start_x(), tuning.player_start_y),
            width: tuning.car_width,
            height: tuning.player_height,
            speed: tuning.base_speed,
            original_speed: tuning.base_speed,
            velocity_x: 0.0,
            tilt: 0.0,
            braking: false,
        }
    }

    /// Enemy car travelling at `speed`
    pub fn enemy(id: u32, kind: CarKind, pos: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            width,
            height,
            speed,
            original_speed: speed,
            velocity_x: 0.0,
            tilt: 0.0,
            braking: false,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == CarKind::Player
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect_at_y(self.pos.y)
    }

    /// Bounding box if the car were at height `y`
    #[inline]
    pub fn rect_at_y(&self, y: f32) -> Rect {
        Rect::new(self.pos.x, y, self.width, self.height)
    }

    pub fn lane(&self, road: &RoadGeometry) -> usize {
        road.lane_of(self.pos.x + self.width / 2.0)
    }

    /// Tuck in behind a leader: clamp position and match its speed
    pub fn follow(&mut self, leader_y: f32, leader_speed: f32, tuning: &Tuning) {
        self.pos.y = leader_y - (self.height + tuning.follow_margin);
        self.speed = self
            .speed
            .min(leader_speed - tuning.follow_speed_gap)
            .max(tuning.min_follow_speed);
        self.braking = true;
    }

    /// Regain speed toward `original_speed`
    pub fn recover_speed(&mut self, step: f32) {
        if self.speed < self.original_speed {
            self.speed = (self.speed + step).min(self.original_speed);
        }
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Obstacles passed this round
    pub score: u64,
    pub lives: u8,
    pub difficulty: Difficulty,
    /// Simulation clock (ms), advanced only while playing
    pub elapsed_ms: f64,
    /// Clock value at the most recent successful spawn
    pub last_obstacle_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Car,
    /// Enemy cars (kept in id order)
    pub obstacles: Vec<Car>,
    /// Stripe scroll offset for the renderer
    pub road_scroll: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state sitting at the menu
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            lives: tuning.start_lives,
            difficulty: Difficulty::new(tuning),
            elapsed_ms: 0.0,
            last_obstacle_ms: 0.0,
            time_ticks: 0,
            player: Car::player(0, tuning),
            obstacles: Vec::new(),
            road_scroll: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh round; the RNG stream carries on
    pub fn reset_round(&mut self, tuning: &Tuning) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = tuning.start_lives;
        self.difficulty = Difficulty::new(tuning);
        self.last_obstacle_ms = self.elapsed_ms;
        self.player = Car::player(0, tuning);
        self.obstacles.clear();
        self.road_scroll = 0.0;
    }

    /// Put the player back at the start column after a crash
    pub fn recenter_player(&mut self, tuning: &Tuning) {
        self.player.pos.x = tuning.player_start_x();
        self.player.velocity_x = 0.0;
    }

    /// Level shown on the HUD
    pub fn level(&self) -> u32 {
        self.difficulty.level
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|c| c.id);
    }
}
