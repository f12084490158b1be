//! The configured water level source and its refresh results.

use crate::{
    DualGageSource, LevelError, LevelReading, NoGageSource, Result, SingleGageSource,
    TideStationSource,
};
use std::fmt;

/// Raw payloads handed in by the data-loading layer for one refresh.
#[derive(Debug, Clone, Copy)]
pub enum LevelPayload<'a> {
    /// A tide station JSON document.
    Tide(&'a str),
    /// Hydrograph XML documents keyed by gage id.
    Gages(&'a [(String, String)]),
    /// Nothing fetched; only valid for a no-gage source.
    None,
}

/// The result of ingesting one refresh payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpdate {
    /// The reading now in effect.
    pub reading: LevelReading,
    /// Warning states to surface on the display.
    pub warnings: Vec<LevelWarning>,
}

/// Warning states surfaced to the display collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelWarning {
    /// The service returned its degraded sentinel; the previous reading is
    /// still in effect.
    DegradedKeepingPrevious,
    /// The service returned its degraded sentinel and no previous reading
    /// exists; a zero reading was accepted.
    DegradedRetryLater,
    /// The named gages did not report a usable reading.
    GagesDown(Vec<String>),
}

impl fmt::Display for LevelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelWarning::DegradedKeepingPrevious => {
                write!(f, "Unable to load air gap. Keeping previous value.")
            }
            LevelWarning::DegradedRetryLater => {
                write!(f, "Unable to load air gap. Retrying at the next refresh.")
            }
            LevelWarning::GagesDown(gages) => match gages.len() {
                0 => write!(f, "Unable to load gages"),
                1 => write!(f, "Unable to load gage {}", gages[0]),
                2 => write!(f, "Unable to load gages {} and {}", gages[0], gages[1]),
                _ => {
                    write!(f, "Unable to load gages ")?;
                    for gage in &gages[..gages.len() - 1] {
                        write!(f, "{}, ", gage)?;
                    }
                    write!(f, "and {}", gages[gages.len() - 1])
                }
            },
        }
    }
}

/// The configured way to obtain a current water level, selected once at
/// configuration time.
#[derive(Debug, Clone)]
pub enum WaterLevelSource {
    /// A tide station with a dedicated air gap sensor.
    TideStation(TideStationSource),
    /// One river gage near the bridge.
    SingleGage(SingleGageSource),
    /// Two river gages bracketing the bridge.
    DualGage(DualGageSource),
    /// No live data configured.
    NoGage(NoGageSource),
}

impl WaterLevelSource {
    /// Select the source variant for a site configuration.
    ///
    /// A station id wins over gages; otherwise the configured gage count
    /// picks the variant.
    pub fn select(
        station_id: Option<&str>,
        gage_ids: &[String],
        gage_distances_m: &[f64],
        base_height_m: f64,
        adjustment_m: f64,
    ) -> Result<Self> {
        if let Some(station_id) = station_id {
            return Ok(WaterLevelSource::TideStation(TideStationSource::new(
                station_id,
            )));
        }

        match gage_ids {
            [] => Ok(WaterLevelSource::NoGage(NoGageSource::new(
                base_height_m,
                adjustment_m,
            ))),
            [gage_id] => Ok(WaterLevelSource::SingleGage(SingleGageSource::new(
                gage_id.as_str(),
                base_height_m,
                adjustment_m,
            ))),
            [first, second] => {
                if gage_distances_m.len() != 2 {
                    return Err(LevelError::BadDistanceCount {
                        count: gage_distances_m.len(),
                    });
                }
                Ok(WaterLevelSource::DualGage(DualGageSource::new(
                    [first.clone(), second.clone()],
                    [gage_distances_m[0], gage_distances_m[1]],
                    base_height_m,
                    adjustment_m,
                )?))
            }
            more => Err(LevelError::TooManyGages { count: more.len() }),
        }
    }

    /// Ingest one refresh payload.
    ///
    /// The payload kind must match the configured variant; a no-gage source
    /// accepts anything and ignores it.
    pub fn ingest(&mut self, payload: &LevelPayload<'_>) -> Result<LevelUpdate> {
        match (self, payload) {
            (WaterLevelSource::TideStation(source), LevelPayload::Tide(json)) => {
                source.ingest(json)
            }
            (WaterLevelSource::SingleGage(source), LevelPayload::Gages(payloads)) => {
                source.ingest(payloads)
            }
            (WaterLevelSource::DualGage(source), LevelPayload::Gages(payloads)) => {
                source.ingest(payloads)
            }
            (WaterLevelSource::NoGage(source), _) => Ok(LevelUpdate {
                reading: source.reading(),
                warnings: Vec::new(),
            }),
            _ => Err(LevelError::PayloadMismatch),
        }
    }

    /// The most recent reading, if any refresh has completed.
    pub fn current(&self) -> Option<LevelReading> {
        match self {
            WaterLevelSource::TideStation(source) => source.current().copied(),
            WaterLevelSource::SingleGage(source) => source.current().copied(),
            WaterLevelSource::DualGage(source) => source.current().copied(),
            WaterLevelSource::NoGage(source) => Some(source.reading()),
        }
    }
}
