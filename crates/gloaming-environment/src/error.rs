//! Environment error types.

/// Settings that cannot drive the environment. Raised at startup.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EnvironmentError {
    /// Swarm extents must be finite numbers.
    #[error("swarm {field} must be finite, got {value}")]
    NonFiniteSwarmBound { field: &'static str, value: f32 },

    /// Swarm member counts are capped.
    #[error("swarm count {count} exceeds the maximum of {max}")]
    SwarmTooLarge { count: usize, max: usize },
}
