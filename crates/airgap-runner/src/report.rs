//! Clearance report formatting.

use airgap_clearance::{AirGapSession, Span, METERS_TO_FEET};
use airgap_level::Freshness;
use chrono::{DateTime, Utc};
use std::fmt::Write;

fn dms(value: f64) -> String {
    let value = value.abs();
    let degrees = value.trunc() as u32;
    let minutes = value.fract() * 60.0;
    let seconds = minutes.fract() * 60.0;

    format!(
        "{}\u{00B0} {:02}' {:07.4}\"",
        degrees,
        minutes.trunc() as u32,
        seconds
    )
}

/// Format a geographic position the way the on-screen readout does:
/// latitude first, unsigned degrees/minutes/seconds with N and W suffixes.
pub fn format_position(lon: f64, lat: f64) -> String {
    format!("{} N, {} W", dms(lat), dms(lon))
}

/// One line describing the reading currently in effect.
pub fn reading_summary(session: &AirGapSession, now: DateTime<Utc>) -> String {
    let reading = session.reading();
    let mut out = String::new();

    let observed = match reading.observed_at {
        Some(observed_at) => observed_at.to_rfc3339(),
        None => "no timestamp".to_string(),
    };
    let marker = match session.freshness(now) {
        Freshness::Fresh => "ok",
        Freshness::Stale => "STALE",
    };

    writeln!(
        out,
        "air gap {:.2} m ({:.2} ft), observed {} [{}], gap change {:+.2} m",
        reading.air_gap_m,
        reading.air_gap_m * METERS_TO_FEET,
        observed,
        marker,
        session.gap_change_m(),
    )
    .expect("writing to a String cannot fail");

    for warning in session.last_warnings() {
        writeln!(out, "warning: {}", warning).expect("writing to a String cannot fail");
    }

    out
}

/// A table of clearances sampled evenly across the waterway width.
pub fn clearance_profile(session: &AirGapSession, rows: usize) -> String {
    let mut out = String::new();
    let width = session.pixel_width();
    let rows = rows.max(2).min(width);
    let step = if rows > 1 {
        (width - 1) as f64 / (rows - 1) as f64
    } else {
        0.0
    };

    for row in 0..rows {
        let x = (step * row as f64).round() as usize;
        let (lon, lat) = session.position_at(x);
        let clearance = match session.value_at(x) {
            None => "   no data".to_string(),
            Some(value_m) if value_m == 0.0 => "    pillar".to_string(),
            Some(value_m) => {
                format!("{:6.2} m ({:6.2} ft)", value_m, value_m * METERS_TO_FEET)
            }
        };

        writeln!(out, "{:>6}  {}  {}", x, clearance, format_position(lon, lat))
            .expect("writing to a String cannot fail");
    }

    out
}

/// One line per classified span.
pub fn span_report(spans: &[Span]) -> String {
    let mut out = String::new();

    if spans.is_empty() {
        out.push_str("no vessel height set, no classification\n");
        return out;
    }

    for span in spans {
        writeln!(
            out,
            "{:>6}..={:<6} {} ({} px)",
            span.start,
            span.end,
            span.category,
            span.len()
        )
        .expect("writing to a String cannot fail");
    }

    out
}

/// The full report printed by the binary.
pub fn render_report(
    session: &AirGapSession,
    vessel_height_m: Option<f64>,
    now: DateTime<Utc>,
    rows: usize,
) -> String {
    let mut out = String::new();

    out.push_str(&reading_summary(session, now));
    out.push('\n');
    out.push_str(&clearance_profile(session, rows));

    if let Some(vessel_height_m) = vessel_height_m {
        let spans = session.classify(Some(vessel_height_m));
        writeln!(out, "\nvessel height {:.2} m:", vessel_height_m)
            .expect("writing to a String cannot fail");
        out.push_str(&span_report(&spans));
    }

    out
}
