//! Game session: the fixed-timestep driver around the simulation
//!
//! Owns the state, the tuning and the collaborators. Frame deltas go into an
//! accumulator that is drained in whole simulation ticks; events coming out
//! of the ticks are turned into sounds and high score writes.

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::highscores::HighScoreStore;
use crate::platform::{Clock, Hud, InputSource, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<A: AudioSink> {
    pub state: GameState,
    tuning: Tuning,
    settings: Settings,
    high_scores: HighScoreStore,
    audio: A,
    /// Cached best score for the HUD
    high_score: u64,
    accumulator: f32,
    input: TickInput,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl<A: AudioSink> Session<A> {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, high_scores: HighScoreStore, audio: A) -> Self {
        let high_score = high_scores.read_high_score();
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            settings,
            high_scores,
            audio,
            high_score,
            accumulator: 0.0,
            input: TickInput::default(),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Take a fresh input sample; one-shot presses are kept until a tick uses them
    pub fn set_input(&mut self, input: TickInput) {
        self.input.steer_left = input.steer_left;
        self.input.steer_right = input.steer_right;
        self.input.autopilot = input.autopilot || self.settings.autopilot;
        self.input.start |= input.start;
        self.input.pause |= input.pause;
        self.input.restart |= input.restart;
    }

    /// Run simulation ticks for a frame of `frame_ms`
    pub fn update(&mut self, frame_ms: f32, time: f64) -> Vec<GameEvent> {
        let frame_ms = frame_ms.clamp(0.0, MAX_FRAME_MS);
        self.accumulator += frame_ms;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            events.extend(tick(&mut self.state, &self.tuning, &input, SIM_DT_MS));
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.pause = false;
            self.input.restart = false;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT_MS);
        }

        for event in &events {
            self.handle_event(event);
        }

        // Track frame times for FPS
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (60000.0 / elapsed).round() as u32;
            }
        }

        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            let volume = self.settings.effective_sfx_volume() * effect.relative_volume();
            self.audio.play(effect, volume);
        }
        if let GameEvent::GameOver { score } = event {
            self.record_high_score(*score);
        }
    }

    fn record_high_score(&mut self, score: u64) {
        if self.high_scores.is_new_best(score) {
            self.high_score = self.high_scores.write_high_score(score);
        }
    }

    /// HUD values for the renderer
    pub fn hud(&self) -> Hud {
        Hud {
            high_score: self.high_score,
            fps: self.fps,
            show_fps: self.settings.show_fps,
        }
    }

    /// Save the current round's score on quit
    pub fn finish(&mut self) {
        self.record_high_score(self.state.score);
    }

    /// Drive `frames` frames through the collaborators, then finish
    pub fn run<I, R, C>(&mut self, input: &mut I, renderer: &mut R, clock: &mut C, frames: u64)
    where
        I: InputSource,
        R: Renderer,
        C: Clock,
    {
        let frame_ms = SIM_DT_MS as f64;
        let mut last = clock.now_ms();
        for _ in 0..frames {
            self.set_input(input.poll());
            let now = clock.now_ms();
            self.update((now - last) as f32, now);
            last = now;
            renderer.draw(&self.state, &self.hud());
            clock.wait_for_next_frame(frame_ms);
        }
        self.finish();
    }
}
