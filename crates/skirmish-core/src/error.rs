//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("archetype `{archetype}`: {field} must be positive, got {value}")]
    NotPositive {
        archetype: String,
        field: &'static str,
        value: f64,
    },

    #[error("archetype `{archetype}`: {field} must not be negative, got {value}")]
    Negative {
        archetype: String,
        field: &'static str,
        value: f64,
    },

    #[error("archetype `{archetype}`: duplicate attack name `{attack}`")]
    DuplicateAttack { archetype: String, attack: String },

    #[error("archetype `{archetype}`: phase thresholds must descend within [0, 1]")]
    BadThresholds { archetype: String },

    #[error("archetype `{archetype}` is a boss but has no boss section")]
    MissingBossConfig { archetype: String },

    #[error("unknown archetype `{0}`")]
    UnknownArchetype(String),

    #[error("scripted hit references agent spawn #{index}, only {count} spawns defined")]
    BadSpawnIndex { index: usize, count: usize },
}
