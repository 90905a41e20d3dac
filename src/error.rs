//! Custom error types for tts-sync

use thiserror::Error;

use crate::sync::SessionId;

/// Main error type for tts-sync
#[derive(Error, Debug)]
pub enum TtsSyncError {
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Audio delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Audio metadata error: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller contract violations raised by the sync controller.
///
/// Missing timings, empty text and out-of-range positions are not errors;
/// they resolve to "nothing highlighted".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("No playback session is active")]
    NoActiveSession,

    #[error("Event tagged with session {event} but only sessions up to {latest} were issued")]
    UnknownSession { event: SessionId, latest: SessionId },
}

/// Audio delivery failure. Transport details stay with the delivery service.
#[derive(Error, Debug)]
#[error("Audio delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration value: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, TtsSyncError>;
