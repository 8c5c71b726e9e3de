//! Gloaming: headless host for the day cycle.
//!
//! Loads the config, runs one day per session on a fixed-step loop and plays
//! the player's part from the command line: when to leave the opening phase
//! and, optionally, when an enemy strikes.
//!
//! Run with: `cargo run -p gloaming-game -- --phase-seconds 10`

mod game_loop;
mod host;
mod session;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use gloaming_config::{CliArgs, Config};
use gloaming_cycle::{Outcome, Phase};
use tracing::{error, info, warn};

use crate::game_loop::GameLoop;
use crate::session::{Session, SessionError};

/// CLI arguments for the game binary.
#[derive(Parser, Debug)]
#[command(name = "gloaming", about = "Gloaming day-cycle simulation")]
struct GameArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Seconds to idle in the opening phase before starting the day.
    #[arg(long, default_value_t = 0.0)]
    start_after: f64,

    /// Simulated second at which an enemy kills the player.
    #[arg(long)]
    death_at: Option<f64>,

    /// Days to replay after the first reload.
    #[arg(long, default_value_t = 0)]
    restarts: u32,

    /// Give up after this many simulated seconds per day.
    #[arg(long, default_value_t = 86_400.0)]
    max_seconds: f64,
}

/// How a day's session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayEnd {
    Reloaded(Outcome),
    TimedOut,
}

fn main() -> ExitCode {
    let args = GameArgs::parse();

    let config_dir = match args.cli.config.clone() {
        Some(dir) => dir,
        None => match Config::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("gloaming: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gloaming: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args.cli);

    gloaming_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!("Gloaming day cycle");
    info!(
        "Config: {} | tick rate {} Hz | realtime {}",
        config_dir.display(),
        config.sim.tick_rate_hz,
        config.sim.realtime
    );

    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, args: &GameArgs) -> Result<(), SessionError> {
    let seed = config.cycle.seed.unwrap_or_else(rand::random);
    info!(seed, "day cycle seed");

    let mut day: u32 = 0;
    loop {
        let mut session = Session::new(config, u64::from(day).wrapping_add(seed))?;
        info!(
            day,
            seconds = ?session.clock().durations().as_slice(),
            "session started"
        );

        match play_day(&mut session, config, args) {
            DayEnd::Reloaded(outcome) => info!(day, ?outcome, "scene reloaded"),
            DayEnd::TimedOut => {
                warn!(day, phase = %session.phase(), "simulated time limit reached");
                return Ok(());
            }
        }

        if day >= args.restarts {
            return Ok(());
        }
        day += 1;
    }
}

/// Step one session until the scene reloads or the time limit passes.
fn play_day(session: &mut Session, config: &Config, args: &GameArgs) -> DayEnd {
    let mut game_loop = GameLoop::new(config.sim.fixed_dt(), config.sim.max_frame_seconds);
    let mut last_frame = Instant::now();
    let mut death_reported = false;
    let mut ended = None;

    while ended.is_none() {
        let frame_time = if config.sim.realtime {
            std::thread::sleep(Duration::from_secs_f64(game_loop.fixed_dt()));
            let now = Instant::now();
            let frame_time = now.duration_since(last_frame).as_secs_f64();
            last_frame = now;
            frame_time
        } else {
            game_loop.fixed_dt()
        };

        game_loop.tick(frame_time, |dt, sim_time| {
            if ended.is_some() {
                return;
            }
            if session.phase() == Phase::Start && sim_time >= args.start_after {
                session.press_start();
            }
            if let Some(death_at) = args.death_at
                && !death_reported
                && sim_time >= death_at
            {
                death_reported = true;
                session.report_death();
            }

            if let Some(outcome) = session.tick(dt) {
                ended = Some(DayEnd::Reloaded(outcome));
            } else if session.sim_time() >= args.max_seconds {
                ended = Some(DayEnd::TimedOut);
            }
        });
    }

    info!(
        frames = game_loop.frame_count(),
        updates = game_loop.update_count(),
        sim_seconds = game_loop.total_sim_time(),
        "day finished"
    );
    ended.unwrap_or(DayEnd::TimedOut)
}
