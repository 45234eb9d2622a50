//! Errors for the few fallible game-logic calls.
//!
//! Meter deltas are never errors; they are clamped. What remains are
//! lookups into the content tables and configuration loading.

use thiserror::Error;

use crate::config::ConfigError;

/// Game-logic result type
pub type Result<T> = std::result::Result<T, GardenError>;

/// Game-logic errors
#[derive(Debug, Error)]
pub enum GardenError {
    #[error("event {event} has no choice {index} ({available} available)")]
    InvalidEventChoice {
        event: String,
        index: usize,
        available: usize,
    },

    #[error("unknown visitor: {0}")]
    UnknownVisitor(String),

    #[error("visitor table has {0} entries, a daily pair needs at least 2")]
    NotEnoughVisitors(usize),

    #[error("invalid configuration: {}", format_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
