//! Ordered contour polyline and the projection values derived from it.

use crate::{ContourDocument, ContourError, Result};
use serde::{Deserialize, Serialize};

/// One sample of the bridge underside contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSample {
    /// Longitude in decimal degrees (negative = west).
    pub lon: f64,
    /// Latitude in decimal degrees (positive = north).
    pub lat: f64,
    /// Clearance above the baseline water level in meters.
    ///
    /// Exactly zero marks a pillar or other structural obstruction.
    pub height_m: f64,
}

/// Compass direction of flow from upstream to downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    /// Water flows from east to west.
    #[serde(rename = "east_west")]
    EastToWest,
    /// Water flows from west to east.
    #[serde(rename = "west_east")]
    WestToEast,
}

/// Which way the viewer is facing along the waterway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Looking upstream.
    #[serde(rename = "up")]
    Upstream,
    /// Looking downstream.
    #[serde(rename = "down")]
    Downstream,
}

impl Orientation {
    /// The opposite viewing direction.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Upstream => Orientation::Downstream,
            Orientation::Downstream => Orientation::Upstream,
        }
    }
}

/// Whether the raw west-to-east coordinate order must be reversed so that
/// the sequence runs left to right as seen from the configured viewpoint.
///
/// Applied exactly once at load time, never per-access.
pub fn reverses_coordinates(orientation: Orientation, flow: FlowDirection) -> bool {
    matches!(
        (orientation, flow),
        (Orientation::Upstream, FlowDirection::EastToWest)
            | (Orientation::Downstream, FlowDirection::WestToEast)
    )
}

/// The ordered contour polyline used by everything downstream.
///
/// Holds at least two samples. The order is semantically meaningful: it runs
/// left to right across the rendered waterway for the initial orientation.
#[derive(Debug, Clone)]
pub struct GeoProfile {
    samples: Vec<ContourSample>,
    declared_length_m: f64,
}

impl GeoProfile {
    /// Build a profile from already-extracted samples.
    ///
    /// `reverse` flips the whole sequence before storing it.
    pub fn new(mut samples: Vec<ContourSample>, declared_length_m: f64, reverse: bool) -> Result<Self> {
        if samples.len() < 2 {
            return Err(ContourError::TooFewSamples {
                count: samples.len(),
            });
        }
        if reverse {
            samples.reverse();
        }
        Ok(Self {
            samples,
            declared_length_m,
        })
    }

    /// Build a profile from a decoded contour document, reversing the
    /// sample order when the configured orientation requires it.
    pub fn from_document(
        document: &ContourDocument,
        flow: FlowDirection,
        orientation: Orientation,
    ) -> Result<Self> {
        let coordinates = document.coordinates()?;
        let mut samples = Vec::with_capacity(coordinates.len());

        for (index, triple) in coordinates.iter().enumerate() {
            if triple.len() != 3 {
                return Err(ContourError::MalformedSample {
                    index,
                    len: triple.len(),
                });
            }
            samples.push(ContourSample {
                lon: triple[0],
                lat: triple[1],
                height_m: triple[2],
            });
        }

        Self::new(
            samples,
            document.declared_length_m()?,
            reverses_coordinates(orientation, flow),
        )
    }

    /// Number of samples in the profile.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a profile holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample at `index`, if in range.
    pub fn sample_at(&self, index: usize) -> Option<&ContourSample> {
        self.samples.get(index)
    }

    /// The first sample of the ordered sequence.
    pub fn first(&self) -> &ContourSample {
        &self.samples[0]
    }

    /// The last sample of the ordered sequence.
    pub fn last(&self) -> &ContourSample {
        &self.samples[self.samples.len() - 1]
    }

    /// All samples in order.
    pub fn samples(&self) -> &[ContourSample] {
        &self.samples
    }

    /// Real-world length of the contour line in meters.
    pub fn declared_length_m(&self) -> f64 {
        self.declared_length_m
    }

    /// Geographic coordinate at pixel column `x`, interpolated linearly
    /// between the profile endpoints.
    ///
    /// Returns `(lon, lat)` in signed decimal degrees.
    pub fn position_at(&self, x: usize, pixel_width: usize) -> (f64, f64) {
        let first = self.first();
        let last = self.last();
        let step_lon = (last.lon - first.lon) / pixel_width as f64;
        let step_lat = (last.lat - first.lat) / pixel_width as f64;

        (
            first.lon + step_lon * x as f64,
            first.lat + step_lat * x as f64,
        )
    }
}

/// Meters-per-pixel scale factors for the rendered waterway.
///
/// Both axes share the same scale, derived from the declared real-world
/// length of the contour line and the waterway pixel width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactors {
    /// Meters per pixel along the waterway.
    pub x: f64,
    /// Meters per pixel vertically.
    pub y: f64,
}

impl ScaleFactors {
    /// Derive isotropic scale factors.
    pub fn derive(declared_length_m: f64, pixel_width: usize) -> Result<Self> {
        if pixel_width == 0 {
            return Err(ContourError::ZeroPixelWidth);
        }
        if declared_length_m <= 0.0 {
            return Err(ContourError::InvalidLength(declared_length_m));
        }

        let meters_per_pixel = declared_length_m / pixel_width as f64;
        Ok(Self {
            x: meters_per_pixel,
            y: meters_per_pixel,
        })
    }
}
