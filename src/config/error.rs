//! Configuration error types.

use thiserror::Error;

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigIssue {
    #[error("challenge trigger chance {0} is outside 0.0..=1.0")]
    TriggerChanceOutOfRange(f64),

    #[error("duration '{field}' must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("challenge countdown must be at least one second")]
    ZeroCountdown,

    #[error("at least one tracking target is required")]
    NoTargets,

    #[error("tracking target '{0}' is listed more than once")]
    DuplicateTarget(String),

    #[error("click colour given for '{0}', which is not a tracking target")]
    UnknownClickTarget(String),
}

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for a `GameConfig`
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Parsed fine, but one or more values are unusable
    #[error("invalid configuration: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
