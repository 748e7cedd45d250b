//! Error types for devtab-core.
//!
//! The hierarchy mirrors the boundaries of the library: configuration
//! storage, settings validation, and the audio/notification collaborators
//! the timer talks to.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Settings failed validation at the settings boundary
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty after trimming
    #[error("Missing required field '{0}'")]
    Required(String),

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Failure reported by an audio cue player.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio output is available on this host
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    /// Playback started but failed
    #[error("Audio playback failed: {0}")]
    Playback(#[from] std::io::Error),
}

/// Failure reported by a notification service.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The notification could not be shown
    #[error("Failed to show notification: {0}")]
    ShowFailed(String),
}
