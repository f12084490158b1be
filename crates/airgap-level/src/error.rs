//! Error types for the water level crate.

use thiserror::Error;

/// Errors that can occur when decoding payloads or selecting a source.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The tide station payload is not valid JSON.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The hydrograph payload is not well-formed XML.
    #[error("XML decode error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The tide station payload decoded but carries no observations.
    #[error("Tide payload contains no observations")]
    EmptyTidePayload,

    /// An observation value could not be parsed as a number.
    #[error("Unparseable water level value {value:?}")]
    BadValue {
        /// The raw value text.
        value: String,
    },

    /// The payload kind does not match the configured source variant.
    #[error("Payload does not match the configured water level source")]
    PayloadMismatch,

    /// A dual gage pair needs exactly two bridge distances.
    #[error("Dual gage source requires 2 distances, got {count}")]
    BadDistanceCount {
        /// Number of distances configured.
        count: usize,
    },

    /// The distance between a dual gage pair must be positive.
    #[error("Dual gage source requires a positive total distance")]
    ZeroGageDistance,

    /// More gages were configured than the interpolation supports.
    #[error("At most 2 gages are supported, got {count}")]
    TooManyGages {
        /// Number of gages configured.
        count: usize,
    },
}
