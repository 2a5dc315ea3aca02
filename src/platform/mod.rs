//! Platform abstraction layer
//!
//! Handles the collaborators the simulation never touches directly:
//! - Time/frame pacing
//! - Input polling
//! - Drawing

use std::time::{Duration, Instant};

use crate::sim::{GamePhase, GameState, TickInput};

/// Monotonic time source with frame pacing
pub trait Clock {
    /// Milliseconds since the clock was created
    fn now_ms(&self) -> f64;
    /// Block until the next frame boundary
    fn wait_for_next_frame(&mut self, frame_ms: f64);
}

/// Wall clock backed by `Instant`
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    next_frame: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            next_frame: now,
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    fn wait_for_next_frame(&mut self, frame_ms: f64) {
        self.next_frame += Duration::from_secs_f64(frame_ms / 1000.0);
        let now = Instant::now();
        if self.next_frame > now {
            std::thread::sleep(self.next_frame - now);
        } else {
            // Running behind; don't try to catch up with a burst
            self.next_frame = now;
        }
    }
}

/// Clock that only moves when a frame is waited for
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: f64,
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn wait_for_next_frame(&mut self, frame_ms: f64) {
        self.now += frame_ms;
    }
}

/// Polled input, one sample per frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Replays a fixed list of inputs, then holds the default
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let input = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Always hands the wheel to the autopilot
#[derive(Debug, Default)]
pub struct AutopilotInput;

impl InputSource for AutopilotInput {
    fn poll(&mut self) -> TickInput {
        TickInput {
            autopilot: true,
            ..Default::default()
        }
    }
}

/// Values shown alongside the game state
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud {
    pub high_score: u64,
    pub fps: u32,
    pub show_fps: bool,
}

/// Draws a frame; nothing it returns feeds back into the game
pub trait Renderer {
    fn draw(&mut self, state: &GameState, hud: &Hud);
}

/// Logs the HUD instead of drawing (headless runs)
#[derive(Debug)]
pub struct HeadlessRenderer {
    /// Log the HUD every this many frames
    pub every: u64,
    frames: u64,
    last_phase: Option<GamePhase>,
}

impl HeadlessRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_phase: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, state: &GameState, hud: &Hud) {
        self.frames += 1;

        if self.last_phase != Some(state.phase) {
            log::info!("[{:?}]", state.phase);
            self.last_phase = Some(state.phase);
        }

        if self.frames.is_multiple_of(self.every) && state.phase == GamePhase::Playing {
            let fps = if hud.show_fps {
                format!(" | FPS: {}", hud.fps)
            } else {
                String::new()
            };
            log::info!(
                "Score: {} | Level: {} | Lives: {} | Cars: {} | High: {}{}",
                state.score,
                state.level(),
                state.lives,
                state.obstacles.len(),
                hud.high_score,
                fps
            );
        }
    }
}
