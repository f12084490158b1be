//! Decoding of the contour GeoJSON payload.
//!
//! The survey tooling writes a FeatureCollection with a single feature: a
//! MultiLineString whose first line holds the `[lon, lat, height]` samples,
//! and a `length` property with the real-world length of the line in meters.

use crate::{ContourError, Result};
use serde::Deserialize;

/// A decoded contour FeatureCollection.
#[derive(Debug, Clone, Deserialize)]
pub struct ContourDocument {
    /// Features in the collection; only the first is used.
    pub features: Vec<ContourFeature>,
}

/// A single contour feature.
#[derive(Debug, Clone, Deserialize)]
pub struct ContourFeature {
    /// Feature properties.
    pub properties: ContourProperties,
    /// Feature geometry.
    pub geometry: ContourGeometry,
}

/// Properties attached to the contour feature.
#[derive(Debug, Clone, Deserialize)]
pub struct ContourProperties {
    /// Real-world length of the contour line in meters.
    pub length: f64,
}

/// MultiLineString geometry holding the sample triples.
#[derive(Debug, Clone, Deserialize)]
pub struct ContourGeometry {
    /// Lines of `[lon, lat, height]` triples; only the first line is used.
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

impl ContourDocument {
    /// Decode a contour payload from its JSON text.
    pub fn from_json(payload: &str) -> Result<Self> {
        let document: ContourDocument = serde_json::from_str(payload)?;
        Ok(document)
    }

    /// The first feature of the collection.
    pub fn feature(&self) -> Result<&ContourFeature> {
        self.features.first().ok_or(ContourError::MissingFeature)
    }

    /// The raw coordinate triples of the first line string.
    pub fn coordinates(&self) -> Result<&[Vec<f64>]> {
        self.feature()?
            .geometry
            .coordinates
            .first()
            .map(Vec::as_slice)
            .ok_or(ContourError::MissingLineString)
    }

    /// The declared real-world length of the contour line in meters.
    pub fn declared_length_m(&self) -> Result<f64> {
        Ok(self.feature()?.properties.length)
    }
}
