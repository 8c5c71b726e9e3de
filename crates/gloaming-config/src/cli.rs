//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use gloaming_cycle::Phase;

use crate::{Config, PhaseLength};

/// Configuration overrides accepted on the command line.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "gloaming", about = "Gloaming day-cycle simulation")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set every bounded phase to this many seconds.
    #[arg(long)]
    pub phase_seconds: Option<f64>,

    /// Randomize bounded phase lengths at startup.
    #[arg(long)]
    pub debug_mode: Option<bool>,

    /// Lower bound for randomized phase lengths.
    #[arg(long)]
    pub min_phase_seconds: Option<f64>,

    /// Upper bound for randomized phase lengths.
    #[arg(long)]
    pub max_phase_seconds: Option<f64>,

    /// RNG seed for phase lengths and decoration placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of each phase spent fading in its lighting.
    #[arg(long)]
    pub transition_fraction: Option<f64>,

    /// Fixed simulation rate in Hz.
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Pace the simulation against the wall clock.
    #[arg(long)]
    pub realtime: Option<bool>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seconds) = args.phase_seconds {
            for phase in Phase::ALL.into_iter().filter(|p| !p.is_unbounded()) {
                if let Some(length) = self.cycle.phase_lengths.get_mut(phase.index()) {
                    *length = PhaseLength::Seconds(seconds);
                }
            }
        }
        if let Some(debug_mode) = args.debug_mode {
            self.cycle.debug_mode = debug_mode;
        }
        if let Some(min) = args.min_phase_seconds {
            self.cycle.min_phase_seconds = min;
        }
        if let Some(max) = args.max_phase_seconds {
            self.cycle.max_phase_seconds = max;
        }
        if let Some(seed) = args.seed {
            self.cycle.seed = Some(seed);
        }
        if let Some(fraction) = args.transition_fraction {
            self.lighting.transition_fraction = fraction;
        }
        if let Some(rate) = args.tick_rate {
            self.sim.tick_rate_hz = rate;
        }
        if let Some(realtime) = args.realtime {
            self.sim.realtime = realtime;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
