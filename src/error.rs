//! Error types for the autotiler

use thiserror::Error;

/// Errors raised while configuring or running an autotile pass.
#[derive(Debug, Error)]
pub enum AutotileError {
    /// Threshold bands are unusable (too few, unordered, non-finite).
    /// This is a caller bug and is reported before any grid work starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("shape mismatch: expected {expected_width}x{expected_height} ({expected} samples), got {actual}")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AutotileError>;
