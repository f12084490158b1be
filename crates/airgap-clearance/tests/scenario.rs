//! End-to-end scenarios across contour decoding, water level sources, and
//! clearance classification.

use airgap_clearance::{AirGapConfig, AirGapSession, PassageCategory};
use airgap_contour::{FlowDirection, Orientation};
use airgap_level::{Freshness, LevelPayload, LevelWarning, FEET_TO_METERS};
use chrono::{TimeZone, Utc};

const CONTOUR: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": { "length": 240.0 },
        "geometry": {
            "type": "MultiLineString",
            "coordinates": [[
                [-90.180, 38.60, 18.0],
                [-90.1795, 38.6001, 17.5],
                [-90.179, 38.6002, 0.0],
                [-90.1788, 38.6002, 0.0],
                [-90.178, 38.6003, 16.0],
                [-90.177, 38.6004, 18.5],
                [-90.176, 38.6005, 19.0]
            ]]
        }
    }]
}"#;

fn hydrograph(primary_ft: f64, valid: &str) -> String {
    format!(
        "<site><observed><datum>\
         <valid timezone=\"UTC\">{}</valid>\
         <primary name=\"Stage\" units=\"ft\">{}</primary>\
         </datum></observed></site>",
        valid, primary_ft
    )
}

fn gage_config() -> AirGapConfig {
    AirGapConfig {
        base_height_m: 22.0,
        water_level_adjustment_m: 1.2,
        upstream_direction: FlowDirection::WestToEast,
        initial_orientation: Orientation::Downstream,
        ..AirGapConfig::default()
    }
    .with_gages(
        vec!["GRFM7".to_string(), "CAGM7".to_string()],
        vec![400.0, 600.0],
    )
}

#[test]
fn test_dual_gage_session_lifecycle() {
    // 2 m at the first gage, 3 m at the second, bridge 400 m along a
    // 1000 m span: level at the bridge 2.4 m, air gap 22 - 1.2 - 2.4.
    let payloads = vec![
        (
            "GRFM7".to_string(),
            hydrograph(2.0 / FEET_TO_METERS, "2024-03-01T10:30:00-00:00"),
        ),
        (
            "CAGM7".to_string(),
            hydrograph(3.0 / FEET_TO_METERS, "2024-03-01T10:15:00-00:00"),
        ),
    ];

    let mut session = AirGapSession::new(
        gage_config(),
        CONTOUR,
        vec![-3.0; 100],
        100,
        &LevelPayload::Gages(&payloads),
    )
    .expect("Session should build");

    let air_gap = session.reading().air_gap_m;
    assert!((air_gap - (22.0 - 1.2 - 2.4)).abs() < 1e-9);
    assert!((session.gap_change_m() - (22.0 - air_gap)).abs() < 1e-9);
    assert_eq!(
        session.reading().observed_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())
    );

    // The reading is fresh shortly after observation and stale past the
    // configured threshold (30 minutes by default).
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 40, 0).unwrap();
    assert_eq!(session.freshness(now), Freshness::Fresh);
    let later = Utc.with_ymd_and_hms(2024, 3, 1, 11, 30, 0).unwrap();
    assert_eq!(session.freshness(later), Freshness::Stale);

    // The two zero-height samples form a pillar; everything around it
    // clears an 8 m vessel.
    let spans = session.classify(Some(8.0));
    assert!(spans
        .iter()
        .any(|span| span.category == PassageCategory::BlockedByPillar));
    for pair in spans.windows(2) {
        assert!(pair[0].end < pair[1].start);
        assert_ne!(pair[0].category, pair[1].category);
    }

    // Pillar columns report zero clearance regardless of water level.
    let pillar = spans
        .iter()
        .find(|span| span.category == PassageCategory::BlockedByPillar)
        .unwrap();
    for x in pillar.start..=pillar.end {
        assert_eq!(session.value_at(x), Some(0.0));
    }

    // One gage going down degrades to single-gage math and names the gage.
    let degraded = vec![(
        "CAGM7".to_string(),
        hydrograph(3.0 / FEET_TO_METERS, "2024-03-01T10:45:00-00:00"),
    )];
    let warnings = session
        .refresh(&LevelPayload::Gages(&degraded))
        .expect("Refresh should succeed")
        .to_vec();
    assert_eq!(
        warnings,
        vec![LevelWarning::GagesDown(vec!["GRFM7".to_string()])]
    );
    assert_eq!(warnings[0].to_string(), "Unable to load gage GRFM7");
    assert!((session.reading().air_gap_m - (22.0 - 1.2 - 3.0)).abs() < 1e-9);
}

#[test]
fn test_station_session_survives_outage() {
    let config = AirGapConfig {
        base_height_m: 20.0,
        upstream_direction: FlowDirection::WestToEast,
        initial_orientation: Orientation::Upstream,
        ..AirGapConfig::default()
    }
    .with_station("8545240");

    let first = r#"{"data": [{"t": "2024-03-01 12:30", "v": "18.4"}]}"#;
    let mut session = AirGapSession::new(
        config,
        CONTOUR,
        Vec::new(),
        64,
        &LevelPayload::Tide(first),
    )
    .expect("Session should build");

    assert!((session.gap_change_m() - 1.6).abs() < 1e-9);
    let baseline: Vec<Option<f64>> = (0..64).map(|x| session.value_at(x)).collect();

    // A degraded refresh keeps the previous reading and the whole profile.
    let outage = r#"{"data": [{"t": "2024-03-01 12:36", "v": "0"}]}"#;
    let warnings = session
        .refresh(&LevelPayload::Tide(outage))
        .expect("Degraded refresh is not an error")
        .to_vec();
    assert_eq!(warnings, vec![LevelWarning::DegradedKeepingPrevious]);

    let after: Vec<Option<f64>> = (0..64).map(|x| session.value_at(x)).collect();
    assert_eq!(baseline, after);

    // A malformed refresh changes nothing either.
    assert!(session.refresh(&LevelPayload::Tide("garbage")).is_err());
    assert!((session.gap_change_m() - 1.6).abs() < 1e-9);
}

#[test]
fn test_orientation_round_trip_with_refresh_between() {
    let payloads = vec![
        (
            "GRFM7".to_string(),
            hydrograph(2.0 / FEET_TO_METERS, "2024-03-01T10:30:00-00:00"),
        ),
        (
            "CAGM7".to_string(),
            hydrograph(3.0 / FEET_TO_METERS, "2024-03-01T10:15:00-00:00"),
        ),
    ];

    let mut session = AirGapSession::new(
        gage_config(),
        CONTOUR,
        Vec::new(),
        50,
        &LevelPayload::Gages(&payloads),
    )
    .expect("Session should build");

    let values: Vec<Option<f64>> = (0..50).map(|x| session.value_at(x)).collect();
    let spans = session.classify(Some(8.0));

    session.toggle_orientation();
    let mirrored: Vec<Option<f64>> = (0..50).map(|x| session.value_at(x)).collect();
    for x in 0..50 {
        assert_eq!(mirrored[x], values[49 - x]);
    }

    session.toggle_orientation();
    let restored: Vec<Option<f64>> = (0..50).map(|x| session.value_at(x)).collect();
    assert_eq!(values, restored);
    assert_eq!(spans, session.classify(Some(8.0)));
}
