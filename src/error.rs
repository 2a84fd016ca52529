//! Error types

use thiserror::Error;

/// Failure to create an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntityError {
    /// The list already holds its configured maximum; nothing was linked
    #[error("entity list is full ({capacity} entities)")]
    CapacityExhausted { capacity: usize },
}

/// Failure to load or validate `Settings`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}
