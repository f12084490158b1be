//! Error types for the clearance crate.

use thiserror::Error;

/// Errors that can occur when building or refreshing a session.
#[derive(Debug, Error)]
pub enum ClearanceError {
    /// Contour decoding or bucketizing failed; fatal to initialization.
    #[error("Contour error: {0}")]
    Contour(#[from] airgap_contour::ContourError),

    /// Water level payload handling failed; the previous reading stays in
    /// effect.
    #[error("Water level error: {0}")]
    Level(#[from] airgap_level::LevelError),

    /// The session configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}
