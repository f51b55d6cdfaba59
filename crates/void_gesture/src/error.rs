//! Error types for the gesture controller

use thiserror::Error;

/// Gesture controller errors
///
/// The arbitration, trackball and zoom paths never fail; these errors only
/// come from loading configuration and running the tick loop.
#[derive(Debug, Error)]
pub enum GestureError {
    /// Configuration value out of range
    #[error("Invalid gesture configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed
    #[error("Failed to parse gesture configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Event loop driving the tick timer failed
    #[error("Gesture loop error: {0}")]
    Scheduler(#[from] calloop::Error),
}

/// Result type for gesture operations
pub type Result<T> = std::result::Result<T, GestureError>;
