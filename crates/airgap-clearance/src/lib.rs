//! # airgap-clearance
//!
//! Clearance resolution and impassability classification for air gap
//! visualizations.
//!
//! Given the bucketized bridge contour from `airgap-contour` and the
//! current water level from `airgap-level`, this crate answers the two
//! questions the display layer asks:
//!
//! - what is the navigable clearance at pixel column `x`?
//!   ([`ClearanceResolver::value_at`], [`AirGapSession::value_at`])
//! - which stretches of the waterway can a vessel of height `h` not pass?
//!   ([`classify_spans`], [`AirGapSession::classify`])
//!
//! [`AirGapSession`] is the owning context object: it joins the contour
//! payload, bathymetry depths, configuration, and the configured water
//! level source, and keeps the derived state consistent - a refresh
//! replaces the reading, the gap change, and the resolver state as one
//! step, and orientation changes flip display coordinates without
//! touching the bucket data.
//!
//! ## Example
//!
//! ```
//! use airgap_clearance::{AirGapConfig, AirGapSession, PassageCategory};
//! use airgap_contour::{FlowDirection, Orientation};
//! use airgap_level::LevelPayload;
//!
//! let config = AirGapConfig {
//!     base_height_m: 20.0,
//!     water_level_adjustment_m: 0.0,
//!     upstream_direction: FlowDirection::WestToEast,
//!     initial_orientation: Orientation::Upstream,
//!     ..AirGapConfig::default()
//! };
//!
//! let contour = r#"{
//!     "features": [{
//!         "properties": { "length": 30.0 },
//!         "geometry": { "coordinates": [[
//!             [0.0, 0.0, 5.0], [1.0, 0.0, 0.0], [2.0, 0.0, 5.0]
//!         ]] }
//!     }]
//! }"#;
//!
//! // A constant 19 m air gap: gap change = 20 - 19 = 1 m.
//! let tide = r#"{"data": [{"t": "2024-03-01 12:30", "v": "19.0"}]}"#;
//! let session = AirGapSession::new(
//!     config.with_station("9410170"),
//!     contour,
//!     Vec::new(),
//!     3,
//!     &LevelPayload::Tide(tide),
//! )?;
//!
//! assert_eq!(session.value_at(0), Some(4.0));
//! assert_eq!(session.value_at(1), Some(0.0)); // pillar
//!
//! let spans = session.classify(Some(3.0));
//! assert_eq!(spans[1].category, PassageCategory::BlockedByPillar);
//! # Ok::<(), airgap_clearance::ClearanceError>(())
//! ```

mod classify;
mod config;
mod error;
mod resolver;
mod session;

pub use classify::{classify_spans, PassageCategory, Span};
pub use config::{AirGapConfig, Padding};
pub use error::ClearanceError;
pub use resolver::ClearanceResolver;
pub use session::AirGapSession;

/// Conversion factor from meters to feet for clearance display.
pub const METERS_TO_FEET: f64 = 3.281;

/// Result type for clearance operations.
pub type Result<T> = std::result::Result<T, ClearanceError>;
