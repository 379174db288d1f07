//! Error types for framecrate

use thiserror::Error;

/// Main error type for framecrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rotation: {0}")]
    InvalidRotation(String),

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Degenerate camera: distance to origin is {distance}")]
    DegenerateCamera { distance: f64 },

    #[error("Unknown frame: {0}")]
    UnknownFrame(String),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for framecrate operations
pub type Result<T> = std::result::Result<T, Error>;
