//! Tide station air gap payloads.
//!
//! NOAA air gap products return JSON of the form
//! `{"data": [{"t": "2024-03-01 12:30", "v": "19.812"}]}` with the
//! timestamp in GMT and the measured air gap in meters. A value of exactly
//! zero is the service's degraded-data sentinel, not a real measurement.

use crate::source::{LevelUpdate, LevelWarning};
use crate::{LevelError, LevelReading, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// A decoded tide station payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TideDocument {
    /// Observations, most recent first; only the first is used.
    pub data: Vec<TideObservation>,
}

/// One tide station observation.
#[derive(Debug, Clone, Deserialize)]
pub struct TideObservation {
    /// Observation timestamp, `YYYY-MM-DD HH:MM` in GMT.
    pub t: String,
    /// Measured air gap in meters, serialized as a string.
    pub v: String,
}

impl TideDocument {
    /// Decode a tide station payload from its JSON text.
    pub fn from_json(payload: &str) -> Result<Self> {
        let document: TideDocument = serde_json::from_str(payload)?;
        Ok(document)
    }
}

impl TideObservation {
    /// The measured air gap in meters.
    pub fn air_gap_m(&self) -> Result<f64> {
        self.v.trim().parse().map_err(|_| LevelError::BadValue {
            value: self.v.clone(),
        })
    }

    /// The observation timestamp, `None` when unparseable.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(self.t.trim(), "%Y-%m-%d %H:%M")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// A single authoritative air gap sensor at a tide station.
///
/// Keeps the last good reading so a degraded service (the zero sentinel)
/// does not wipe out live data.
#[derive(Debug, Clone)]
pub struct TideStationSource {
    station_id: String,
    previous: Option<LevelReading>,
}

impl TideStationSource {
    /// Create a source for the given station.
    pub fn new(station_id: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            previous: None,
        }
    }

    /// The configured station id.
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// The most recent reading, if any refresh has completed.
    pub fn current(&self) -> Option<&LevelReading> {
        self.previous.as_ref()
    }

    /// Ingest one tide station payload.
    ///
    /// A zero value is the degraded-service sentinel: with a previous valid
    /// reading the previous value is kept and a warning surfaced; without
    /// one the zero is accepted (marked invalid) with a stronger warning.
    pub fn ingest(&mut self, payload: &str) -> Result<LevelUpdate> {
        let document = TideDocument::from_json(payload)?;
        let observation = document.data.first().ok_or(LevelError::EmptyTidePayload)?;
        let air_gap_m = observation.air_gap_m()?;
        let observed_at = observation.observed_at();

        if air_gap_m == 0.0 {
            if let Some(previous) = self.previous.filter(|reading| reading.valid) {
                warn!(
                    station = %self.station_id,
                    "air gap service degraded, keeping previous reading"
                );
                return Ok(LevelUpdate {
                    reading: previous,
                    warnings: vec![LevelWarning::DegradedKeepingPrevious],
                });
            }

            warn!(
                station = %self.station_id,
                "air gap service degraded with no previous reading"
            );
            let reading = LevelReading {
                air_gap_m: 0.0,
                observed_at,
                valid: false,
            };
            self.previous = Some(reading);
            return Ok(LevelUpdate {
                reading,
                warnings: vec![LevelWarning::DegradedRetryLater],
            });
        }

        let reading = LevelReading {
            air_gap_m,
            observed_at,
            valid: true,
        };
        self.previous = Some(reading);
        Ok(LevelUpdate {
            reading,
            warnings: Vec::new(),
        })
    }
}
