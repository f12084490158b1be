//! # airgap-level
//!
//! Water level sources for air gap visualizations.
//!
//! The air gap under a bridge moves with the water. Depending on the site,
//! the current level comes from one of four places:
//!
//! - a NOAA tide station with a dedicated air gap sensor,
//! - a single river gage near the bridge,
//! - two river gages bracketing the bridge, interpolated linearly by
//!   distance,
//! - nowhere - some bridges have no live data at all.
//!
//! This crate decodes the raw payloads those services return (tide-station
//! JSON, hydrograph XML), applies the site configuration, and produces a
//! [`LevelReading`]: the current air gap reference in meters plus the
//! observation timestamp. Degraded services and unreachable gages never
//! fail a refresh; they surface as [`LevelWarning`] values so the display
//! layer can show a staleness indicator, and the previous reading stays in
//! place.
//!
//! ## Example
//!
//! ```
//! use airgap_level::{LevelPayload, WaterLevelSource};
//!
//! let mut source = WaterLevelSource::select(
//!     Some("9410170"), // tide station id
//!     &[],
//!     &[],
//!     22.0, // base height, meters
//!     0.0,  // water level adjustment, meters
//! )?;
//!
//! let payload = r#"{"data": [{"t": "2024-03-01 12:30", "v": "19.812"}]}"#;
//! let update = source.ingest(&LevelPayload::Tide(payload))?;
//!
//! assert_eq!(update.reading.air_gap_m, 19.812);
//! assert!(update.warnings.is_empty());
//! # Ok::<(), airgap_level::LevelError>(())
//! ```

mod error;
mod gage;
mod reading;
mod source;
mod tide;

pub use error::LevelError;
pub use gage::{
    dual_gage_air_gap, single_gage_air_gap, DualGageSource, GageDocument, NoGageSource,
    SingleGageSource, FEET_TO_METERS,
};
pub use reading::{Freshness, LevelReading};
pub use source::{LevelPayload, LevelUpdate, LevelWarning, WaterLevelSource};
pub use tide::{TideDocument, TideObservation, TideStationSource};

/// Result type for water level operations.
pub type Result<T> = std::result::Result<T, LevelError>;
