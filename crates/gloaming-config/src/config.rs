//! Configuration structs with the reference day and RON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gloaming_cycle::{EyeTransition, Phase};
use gloaming_environment::{
    DecorationSchedule, EnvironmentSettings, LightingPreset, LightingTable, SwarmSettings,
    TRANSITION_FRACTION, reference_presets,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Phase lengths and debug pacing.
    pub cycle: CycleConfig,
    /// Per-phase lighting targets.
    pub lighting: LightingConfig,
    /// Which decorations each phase creates and removes.
    pub decorations: DecorationSchedule,
    /// Butterfly swarm placement.
    pub swarm: SwarmSettings,
    /// Eye transitions played before the scene reloads.
    pub game_over: GameOverConfig,
    /// Host tick settings.
    pub sim: SimConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Length of one phase as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PhaseLength {
    /// Never ends on its own.
    Unbounded,
    Seconds(f64),
}

impl PhaseLength {
    pub fn to_seconds(self) -> f64 {
        match self {
            PhaseLength::Unbounded => f64::INFINITY,
            PhaseLength::Seconds(seconds) => seconds,
        }
    }
}

/// Day-cycle pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleConfig {
    /// One entry per phase, Start first. Start and End are always unbounded.
    pub phase_lengths: Vec<PhaseLength>,
    /// Randomize every bounded phase length at startup.
    pub debug_mode: bool,
    /// Lower bound for randomized phase lengths.
    pub min_phase_seconds: f64,
    /// Upper bound for randomized phase lengths.
    pub max_phase_seconds: f64,
    /// Seed for randomized lengths and decoration placement (entropy if unset).
    pub seed: Option<u64>,
}

/// Lighting fade settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Share of a phase's length spent fading in its lighting.
    pub transition_fraction: f64,
    /// Lighting target per phase. Phases without an entry keep their lighting.
    pub phases: BTreeMap<Phase, LightingPreset>,
}

/// Eye transitions for each game-over outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameOverConfig {
    pub win: EyeTransition,
    pub loss: EyeTransition,
}

/// Host tick configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate (Hz).
    pub tick_rate_hz: u32,
    /// Pace the loop against the wall clock instead of running flat out.
    pub realtime: bool,
    /// Longest frame accepted before clamping, in seconds.
    pub max_frame_seconds: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for CycleConfig {
    fn default() -> Self {
        let mut phase_lengths = vec![PhaseLength::Seconds(120.0); Phase::COUNT];
        phase_lengths[Phase::Start.index()] = PhaseLength::Unbounded;
        phase_lengths[Phase::End.index()] = PhaseLength::Unbounded;

        Self {
            phase_lengths,
            debug_mode: false,
            min_phase_seconds: 5.0,
            max_phase_seconds: 15.0,
            seed: None,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            transition_fraction: TRANSITION_FRACTION,
            phases: reference_presets(),
        }
    }
}

impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            win: EyeTransition::WIN,
            loss: EyeTransition::LOSS,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            realtime: false,
            max_frame_seconds: 0.25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Derived runtime values ---

impl CycleConfig {
    /// Phase lengths in seconds, unvalidated.
    pub fn phase_seconds(&self) -> Vec<f64> {
        self.phase_lengths
            .iter()
            .map(|length| length.to_seconds())
            .collect()
    }
}

impl LightingConfig {
    pub fn table(&self) -> LightingTable {
        LightingTable::from_presets(&self.phases)
    }
}

impl SimConfig {
    /// Seconds per fixed tick. A zero rate falls back to 60 Hz.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate_hz.max(1))
    }
}

impl Config {
    /// Controller settings assembled from the lighting and decoration sections.
    pub fn environment_settings(&self) -> EnvironmentSettings {
        EnvironmentSettings {
            transition_fraction: self.lighting.transition_fraction,
            schedule: self.decorations.clone(),
            swarm: self.swarm.clone(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Platform config directory, e.g. `~/.config/gloaming`.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("gloaming"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloaming_environment::DecorationKind;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("Unbounded"));
        assert!(ron_str.contains("transition_fraction: 0.3"));
        assert!(ron_str.contains("Dusk"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_default_day_matches_reference() {
        let config = Config::default();
        let seconds = config.cycle.phase_seconds();
        assert_eq!(seconds.len(), Phase::COUNT);
        assert!(seconds[0].is_infinite());
        assert!(seconds[Phase::COUNT - 1].is_infinite());
        assert!(seconds[1..Phase::COUNT - 1].iter().all(|s| *s == 120.0));

        let table = config.lighting.table();
        assert_eq!(table.len(), 5);
        assert_eq!(config.game_over.win, EyeTransition::WIN);
        assert_eq!(config.game_over.loss, EyeTransition::LOSS);
        assert_eq!(
            config.decorations.on_load.get(&Phase::Dusk),
            Some(&vec![DecorationKind::Fireflies])
        );
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(cycle: (debug_mode: true), sim: (tick_rate_hz: 30))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!(config.cycle.debug_mode);
        assert_eq!(config.cycle.phase_lengths, CycleConfig::default().phase_lengths);
        assert_eq!(config.sim.tick_rate_hz, 30);
        assert_eq!(config.lighting, LightingConfig::default());
        assert_eq!(config.game_over, GameOverConfig::default());
    }

    #[test]
    fn test_short_phase_table_parses() {
        // Length is checked when the clock is built, not when parsing.
        let ron_str = "(cycle: (phase_lengths: [Unbounded, Seconds(10.0), Unbounded]))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.cycle.phase_seconds().len(), 3);
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_fixed_dt_from_tick_rate() {
        let mut sim = SimConfig::default();
        assert!((sim.fixed_dt() - 1.0 / 60.0).abs() < 1e-12);
        sim.tick_rate_hz = 0;
        assert!((sim.fixed_dt() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_environment_settings_follow_config() {
        let mut config = Config::default();
        config.lighting.transition_fraction = 0.5;
        config.swarm.count_min = 2;
        let settings = config.environment_settings();
        assert_eq!(settings.transition_fraction, 0.5);
        assert_eq!(settings.swarm.count_min, 2);
        assert_eq!(settings.schedule, config.decorations);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.cycle.phase_lengths[2] = PhaseLength::Seconds(42.5);
        config.cycle.seed = Some(7);
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_ron_comments_preserved() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
