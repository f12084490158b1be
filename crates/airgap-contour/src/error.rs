//! Error types for the contour crate.

use thiserror::Error;

/// Errors that can occur when decoding or bucketizing a contour.
#[derive(Debug, Error)]
pub enum ContourError {
    /// The contour payload is not valid JSON.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload decoded but carries no feature.
    #[error("Contour document has no features")]
    MissingFeature,

    /// The feature geometry carries no line string.
    #[error("Contour geometry has no line string")]
    MissingLineString,

    /// A coordinate entry is not a `[lon, lat, height]` triple.
    #[error("Contour sample {index} has {len} components, expected [lon, lat, height]")]
    MalformedSample {
        /// Position of the sample in the line string.
        index: usize,
        /// Number of components found.
        len: usize,
    },

    /// Fewer than two samples; no scale or direction can be derived.
    #[error("Contour has {count} samples, at least 2 are required")]
    TooFewSamples {
        /// Number of samples found.
        count: usize,
    },

    /// First and last sample share a longitude; pixel indices are undefined.
    #[error("Contour spans zero longitude, cannot derive pixel indices")]
    DegenerateSpan,

    /// The waterway must be at least one pixel wide.
    #[error("Pixel width must be at least 1")]
    ZeroPixelWidth,

    /// The declared real-world length must be positive.
    #[error("Declared contour length {0} is not positive")]
    InvalidLength(f64),
}
