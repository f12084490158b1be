//! Per-pixel clearance resolution.

use airgap_contour::HeightBuckets;

/// Resolves the navigable clearance at any pixel column.
///
/// Built once per bucket set: for every column the lowest height of the
/// nearest non-empty bucket at or before it is precomputed, so queries are
/// O(1) instead of re-scanning backwards per call. Gaps in sample density
/// are thereby filled by the last known height moving rightward.
#[derive(Debug, Clone)]
pub struct ClearanceResolver {
    /// Worst-case bucketed height per column after backward fill; `None`
    /// where no bucket at or before the column holds any sample.
    floor_heights_m: Vec<Option<f64>>,
    gap_change_m: f64,
}

impl ClearanceResolver {
    /// Precompute floor heights from a bucket set.
    ///
    /// `gap_change_m` is how much higher the water currently sits relative
    /// to the baseline the contour heights were measured at.
    pub fn new(buckets: &HeightBuckets, gap_change_m: f64) -> Self {
        let mut floor_heights_m = Vec::with_capacity(buckets.len());
        let mut carried = None;

        for index in 0..buckets.len() {
            if let Some(lowest) = buckets.min_height(index) {
                carried = Some(lowest);
            }
            floor_heights_m.push(carried);
        }

        Self {
            floor_heights_m,
            gap_change_m,
        }
    }

    /// Number of pixel columns.
    pub fn pixel_width(&self) -> usize {
        self.floor_heights_m.len()
    }

    /// The current gap change in meters.
    pub fn gap_change_m(&self) -> f64 {
        self.gap_change_m
    }

    /// Replace the gap change; floor heights are untouched.
    pub fn set_gap_change(&mut self, gap_change_m: f64) {
        self.gap_change_m = gap_change_m;
    }

    /// Navigable clearance in meters at a pixel column.
    ///
    /// The position is clamped to the valid range. Returns `Some(0.0)` at a
    /// pillar (a zero bucketed height, never adjusted by water level),
    /// `None` when every bucket at or before the position is empty, and the
    /// gap-change-adjusted clearance otherwise. Deterministic for fixed
    /// buckets and gap change.
    pub fn value_at(&self, position: usize) -> Option<f64> {
        let clamped = position.min(self.floor_heights_m.len().saturating_sub(1));
        let floor_m = self.floor_heights_m.get(clamped).copied().flatten()?;

        if floor_m == 0.0 {
            Some(0.0)
        } else {
            Some(floor_m - self.gap_change_m)
        }
    }
}
