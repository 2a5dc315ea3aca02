//! Street Racer entry point
//!
//! Runs a headless session: the autopilot drives, the HUD goes to the log,
//! and the best score is written to `highscore.txt`.
//!
//! Usage: `street-racer [--seed N] [--frames N] [--tuning FILE] [--realtime]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use street_racer::audio::{AudioSink, LogAudio, MUSIC_FOLDER, SilentAudio, find_music};
use street_racer::platform::{AutopilotInput, Clock, HeadlessRenderer, ManualClock, SystemClock};
use street_racer::settings::DEFAULT_SETTINGS_FILE;
use street_racer::{HighScoreStore, Session, Settings, Tuning};

/// Headless Street Racer driven by the autopilot
#[derive(Debug, Parser)]
#[command(version, about)]
struct Options {
    /// Seed for the simulation RNG
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
    /// Frames to run before quitting
    #[arg(long, value_name = "COUNT", default_value_t = 60 * 60)]
    frames: u64,
    /// JSON file overriding the default balance
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Pace frames against the wall clock
    #[arg(long)]
    realtime: bool,
    /// Drop every sound effect
    #[arg(long)]
    mute: bool,
}

fn run_with<C: Clock, A: AudioSink>(options: &Options, tuning: Tuning, settings: Settings, audio: A, clock: &mut C) {
    let mut session = Session::new(options.seed, tuning, settings, HighScoreStore::default(), audio);
    let mut input = AutopilotInput;
    let mut renderer = HeadlessRenderer::new(60 * 5);

    session.run(&mut input, &mut renderer, clock, options.frames);

    log::info!(
        "Finished: score {}, level {}, high score {}",
        session.state.score,
        session.state.level(),
        session.high_score()
    );
}

fn run<A: AudioSink>(options: &Options, tuning: Tuning, settings: Settings, audio: A) {
    if options.realtime {
        run_with(options, tuning, settings, audio, &mut SystemClock::default());
    } else {
        run_with(options, tuning, settings, audio, &mut ManualClock::default());
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Street Racer (headless) starting...");

    let options = Options::parse();

    let tuning = match &options.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not use tuning file {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let mut settings = Settings::load(Path::new(DEFAULT_SETTINGS_FILE));
    settings.muted |= options.mute;

    let mut rng = Pcg32::seed_from_u64(options.seed);
    if let Some(track) = find_music(Path::new(MUSIC_FOLDER), &mut rng) {
        log::info!("Music: {} (volume {:.2})", track.display(), settings.effective_music_volume());
    }

    if settings.muted {
        run(&options, tuning, settings, SilentAudio);
    } else {
        run(&options, tuning, settings, LogAudio::default());
    }

    ExitCode::SUCCESS
}
