//! Water level readings and staleness.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One air gap reference produced by a refresh cycle.
///
/// `air_gap_m` is the clearance at the reference point for the current
/// water level. A refresh replaces the previous reading atomically; a
/// failed refresh leaves the previous reading in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelReading {
    /// Current air gap reference in meters.
    pub air_gap_m: f64,
    /// When the underlying observation was made. `None` for sources with
    /// no live data.
    pub observed_at: Option<DateTime<Utc>>,
    /// False only when a degraded-service zero was accepted because no
    /// previous reading existed.
    pub valid: bool,
}

impl LevelReading {
    /// Classify this reading against a staleness threshold.
    ///
    /// Readings without a timestamp never go stale; there is nothing to
    /// measure their age against.
    pub fn freshness(&self, now: DateTime<Utc>, stale_after: Duration) -> Freshness {
        match self.observed_at {
            Some(observed_at) if now - observed_at > stale_after => Freshness::Stale,
            _ => Freshness::Fresh,
        }
    }
}

/// Whether a reading is recent enough to trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Freshness {
    /// The observation is within the staleness threshold.
    Fresh,
    /// The observation is older than the staleness threshold.
    Stale,
}
