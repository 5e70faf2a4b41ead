//! Error types for configuration and builds

use thiserror::Error;

/// Problems loading or validating a [`BuilderConfig`](crate::BuilderConfig)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Reasons a build is refused or abandoned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("area weights sum to {sum}, expected 100")]
    WeightSum { sum: u32 },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("a build is already running on this builder")]
    Busy,

    #[error("coverage stayed below {limit}% after {passes} passes (best {best}%)")]
    CoverageNotReached { limit: u8, passes: u32, best: u32 },
}
