//! Impassability classification.

use crate::ClearanceResolver;
use serde::Serialize;

/// How a pixel column relates to a vessel trying to pass under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PassageCategory {
    /// Enough clearance for the vessel.
    Clear,
    /// A pillar or other structural obstruction; no vessel passes.
    BlockedByPillar,
    /// Standing structure above water, but less clearance than the vessel
    /// needs.
    BlockedByHeight,
}

impl PassageCategory {
    /// Returns a human-readable description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            PassageCategory::Clear => "clear",
            PassageCategory::BlockedByPillar => "blocked by pillar",
            PassageCategory::BlockedByHeight => "blocked by insufficient height",
        }
    }
}

impl std::fmt::Display for PassageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A run of adjacent pixel columns sharing one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// First pixel column of the run.
    pub start: usize,
    /// Last pixel column of the run, inclusive.
    pub end: usize,
    /// Category shared by every column in the run.
    pub category: PassageCategory,
}

impl Span {
    /// Number of pixel columns covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a span covers at least one column.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Sweep every pixel column and coalesce same-category runs into spans.
///
/// With no vessel height set, no classification happens and no spans are
/// produced. A zero clearance is always a pillar regardless of vessel
/// height. Columns with no clearance data produce no span; they can only
/// form a prefix of the sweep, because bucketizing never leaves the last
/// bucket empty.
pub fn classify_spans(
    resolver: &ClearanceResolver,
    vessel_height_m: Option<f64>,
) -> Vec<Span> {
    let Some(vessel_height_m) = vessel_height_m else {
        return Vec::new();
    };

    let mut spans: Vec<Span> = Vec::new();

    for position in 0..resolver.pixel_width() {
        let Some(value_m) = resolver.value_at(position) else {
            continue;
        };

        let category = if value_m == 0.0 {
            PassageCategory::BlockedByPillar
        } else if value_m < vessel_height_m {
            PassageCategory::BlockedByHeight
        } else {
            PassageCategory::Clear
        };

        match spans.last_mut() {
            Some(span) if span.category == category && span.end + 1 == position => {
                span.end = position;
            }
            _ => spans.push(Span {
                start: position,
                end: position,
                category,
            }),
        }
    }

    spans
}
