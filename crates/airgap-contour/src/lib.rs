//! # airgap-contour
//!
//! Bridge underside height contour handling for air gap visualizations.
//!
//! A bridge survey produces a GeoJSON contour line: an ordered polyline of
//! `[longitude, latitude, height]` samples tracing the underside of the
//! bridge across the waterway, together with the real-world length of the
//! line in meters. This crate decodes that payload, fixes the sample order
//! for the configured viewing orientation, derives meters-per-pixel scale
//! factors, and bins the height samples into per-pixel buckets along the
//! rendered waterway width.
//!
//! ## Overview
//!
//! - [`ContourDocument`] - the decoded GeoJSON payload
//! - [`GeoProfile`] - the ordered polyline used by everything downstream
//! - [`ScaleFactors`] - meters-per-pixel, derived once per session
//! - [`HeightBuckets`] - height samples grouped by pixel column
//!
//! Sample heights are clearances above the baseline water level. A height
//! of exactly zero marks a pillar or other structural obstruction; the
//! contour generator writes zero for any point below its minimum height
//! threshold.
//!
//! ## Example
//!
//! ```
//! use airgap_contour::{
//!     ContourDocument, FlowDirection, GeoProfile, HeightBuckets, Orientation, ScaleFactors,
//! };
//!
//! let payload = r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": { "length": 300.0 },
//!         "geometry": {
//!             "type": "MultiLineString",
//!             "coordinates": [[
//!                 [-122.5, 47.2, 18.0],
//!                 [-122.4995, 47.2001, 0.0],
//!                 [-122.499, 47.2002, 18.5]
//!             ]]
//!         }
//!     }]
//! }"#;
//!
//! let document = ContourDocument::from_json(payload)?;
//! let profile = GeoProfile::from_document(
//!     &document,
//!     FlowDirection::WestToEast,
//!     Orientation::Upstream,
//! )?;
//! let scale = ScaleFactors::derive(profile.declared_length_m(), 3)?;
//! let buckets = HeightBuckets::bucketize(&profile, 3)?;
//!
//! assert_eq!(buckets.len(), 3);
//! assert_eq!(scale.x, 100.0);
//! # Ok::<(), airgap_contour::ContourError>(())
//! ```

mod buckets;
mod error;
mod geojson;
mod profile;

pub use buckets::HeightBuckets;
pub use error::ContourError;
pub use geojson::{ContourDocument, ContourFeature, ContourGeometry, ContourProperties};
pub use profile::{
    reverses_coordinates, ContourSample, FlowDirection, GeoProfile, Orientation, ScaleFactors,
};

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
