//! Configuration system for Gloaming.
//!
//! Settings persist to disk as a RON file and default to the reference day:
//! five bounded phases between an open-ended Start and End, the shipped
//! lighting table and decoration schedule. CLI overrides are parsed with clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, CycleConfig, DebugConfig, GameOverConfig, LightingConfig, PhaseLength, SimConfig,
};
pub use error::ConfigError;
