//! Session configuration.

use crate::{ClearanceError, Result};
use airgap_contour::{FlowDirection, Orientation};
use serde::{Deserialize, Serialize};

/// Pixel padding around the rendered waterway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    /// Pixels left of the waterway.
    #[serde(default)]
    pub left: u32,
    /// Pixels right of the waterway.
    #[serde(default)]
    pub right: u32,
    /// Pixels below the deepest rendered depth.
    #[serde(default)]
    pub bottom: u32,
}

/// Options for an air gap session.
///
/// Loadable from YAML or JSON; unset fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirGapConfig {
    /// Physical reference clearance at the baseline water level, meters.
    pub base_height_m: f64,
    /// Datum offset between gage zero and the baseline level, meters.
    #[serde(default)]
    pub water_level_adjustment_m: f64,
    /// Compass direction of flow from upstream to downstream.
    pub upstream_direction: FlowDirection,
    /// Viewing direction at startup.
    pub initial_orientation: Orientation,
    /// Pixel padding around the waterway.
    #[serde(default)]
    pub padding: Padding,
    /// Readings older than this are flagged stale, milliseconds.
    #[serde(default = "default_stale_after_ms")]
    pub stale_after_ms: i64,
    /// How often the caller should re-ingest level payloads, milliseconds.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Tide station id, when the bridge has an air gap sensor.
    #[serde(default)]
    pub station_id: Option<String>,
    /// River gage ids, at most two.
    #[serde(default)]
    pub gage_ids: Vec<String>,
    /// Distances in meters: first gage to bridge, then bridge to second
    /// gage. Required for a dual gage site.
    #[serde(default)]
    pub gage_distances_m: Vec<f64>,
}

fn default_stale_after_ms() -> i64 {
    30 * 60 * 1000
}

fn default_refresh_interval_ms() -> u64 {
    6 * 60 * 1000
}

impl Default for AirGapConfig {
    fn default() -> Self {
        Self {
            base_height_m: 0.0,
            water_level_adjustment_m: 0.0,
            upstream_direction: FlowDirection::WestToEast,
            initial_orientation: Orientation::Upstream,
            padding: Padding::default(),
            stale_after_ms: default_stale_after_ms(),
            refresh_interval_ms: default_refresh_interval_ms(),
            station_id: None,
            gage_ids: Vec::new(),
            gage_distances_m: Vec::new(),
        }
    }
}

impl AirGapConfig {
    /// This configuration with a tide station id set.
    pub fn with_station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    /// This configuration with gage ids and distances set.
    pub fn with_gages(mut self, gage_ids: Vec<String>, gage_distances_m: Vec<f64>) -> Self {
        self.gage_ids = gage_ids;
        self.gage_distances_m = gage_distances_m;
        self
    }

    /// Check the configuration for values no session can work with.
    pub fn validate(&self) -> Result<()> {
        if !self.base_height_m.is_finite() {
            return Err(ClearanceError::Config(format!(
                "base height {} is not finite",
                self.base_height_m
            )));
        }
        if !self.water_level_adjustment_m.is_finite() {
            return Err(ClearanceError::Config(format!(
                "water level adjustment {} is not finite",
                self.water_level_adjustment_m
            )));
        }
        if self.stale_after_ms <= 0 {
            return Err(ClearanceError::Config(format!(
                "stale-after threshold {} ms is not positive",
                self.stale_after_ms
            )));
        }
        if self.station_id.is_none() && self.gage_ids.len() > 2 {
            return Err(ClearanceError::Config(format!(
                "{} gages configured, at most 2 are supported",
                self.gage_ids.len()
            )));
        }
        Ok(())
    }
}
