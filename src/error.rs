//! Skyscan error types

use thiserror::Error;

/// Errors that can occur while configuring the sky viewport
#[derive(Debug, Error)]
pub enum SkyError {
    /// Hexagon layout has the wrong number of centers
    #[error("Invalid hexagon layout: expected {expected} centers, got {got}")]
    InvalidLayout { expected: usize, got: usize },

    /// Viewport extents or hexagon radius are unusable
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// Settings file could not be read or written
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed
    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for skyscan operations
pub type SkyResult<T> = Result<T, SkyError>;
