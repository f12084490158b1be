//! The owning session state for one bridge visualization.

use crate::{
    classify_spans, AirGapConfig, ClearanceResolver, Result, Span,
};
use airgap_contour::{
    reverses_coordinates, ContourDocument, GeoProfile, HeightBuckets, Orientation, ScaleFactors,
};
use airgap_level::{Freshness, LevelPayload, LevelReading, LevelWarning, WaterLevelSource};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// One bridge's live clearance state.
///
/// Construction is the join point of the initial loads: contour payload,
/// bathymetry depths, configuration, and the first water level payload must
/// all be present before any pixel computation happens. Contour and
/// configuration failures are fatal; missing depths are not (pass an empty
/// vector). After construction the geometry is static for the session -
/// only [`refresh`](Self::refresh) and the orientation change anything.
///
/// All positional queries take display coordinates; flipping the
/// orientation mirrors them onto the unchanged bucket data.
#[derive(Debug)]
pub struct AirGapSession {
    config: AirGapConfig,
    profile: GeoProfile,
    scale: ScaleFactors,
    buckets: HeightBuckets,
    resolver: ClearanceResolver,
    source: WaterLevelSource,
    reading: LevelReading,
    warnings: Vec<LevelWarning>,
    depths_m: Vec<f64>,
    orientation: Orientation,
    pixel_width: usize,
}

impl AirGapSession {
    /// Join the initial loads and build the session.
    ///
    /// `contour_json` is the raw contour payload, `depths_m` the optional
    /// bathymetry profile (empty when unavailable), `pixel_width` the
    /// rendered waterway width, and `initial` the first water level
    /// payload.
    pub fn new(
        config: AirGapConfig,
        contour_json: &str,
        mut depths_m: Vec<f64>,
        pixel_width: usize,
        initial: &LevelPayload<'_>,
    ) -> Result<Self> {
        config.validate()?;

        let document = ContourDocument::from_json(contour_json)?;
        let profile = GeoProfile::from_document(
            &document,
            config.upstream_direction,
            config.initial_orientation,
        )?;
        let scale = ScaleFactors::derive(profile.declared_length_m(), pixel_width)?;
        let buckets = HeightBuckets::bucketize(&profile, pixel_width)?;

        if reverses_coordinates(config.initial_orientation, config.upstream_direction) {
            depths_m.reverse();
        }

        let mut source = WaterLevelSource::select(
            config.station_id.as_deref(),
            &config.gage_ids,
            &config.gage_distances_m,
            config.base_height_m,
            config.water_level_adjustment_m,
        )?;
        let update = source.ingest(initial)?;
        for warning in &update.warnings {
            warn!(%warning, "initial water level load degraded");
        }

        let gap_change_m = config.base_height_m - update.reading.air_gap_m;
        let resolver = ClearanceResolver::new(&buckets, gap_change_m);
        debug!(
            pixel_width,
            samples = profile.len(),
            gap_change_m,
            "session built"
        );

        Ok(Self {
            orientation: config.initial_orientation,
            config,
            profile,
            scale,
            buckets,
            resolver,
            source,
            reading: update.reading,
            warnings: update.warnings,
            depths_m,
            pixel_width,
        })
    }

    /// Ingest a periodic water level payload.
    ///
    /// The reading, the gap change, and the resolver state are replaced
    /// together; queries never observe a half-applied refresh. On error
    /// nothing changes and the previous reading stays in effect.
    pub fn refresh(&mut self, payload: &LevelPayload<'_>) -> Result<&[LevelWarning]> {
        let update = self.source.ingest(payload)?;

        self.reading = update.reading;
        self.warnings = update.warnings;
        self.resolver
            .set_gap_change(self.config.base_height_m - self.reading.air_gap_m);

        Ok(&self.warnings)
    }

    /// Navigable clearance in meters at a display pixel column.
    ///
    /// `Some(0.0)` marks a pillar; `None` means no contour data covers the
    /// column or anything left of it.
    pub fn value_at(&self, display_x: usize) -> Option<f64> {
        self.resolver.value_at(self.data_position(display_x))
    }

    /// Classified spans for a vessel height, in display coordinates.
    ///
    /// `None` disables impassability highlighting and yields no spans.
    pub fn classify(&self, vessel_height_m: Option<f64>) -> Vec<Span> {
        let spans = classify_spans(&self.resolver, vessel_height_m);
        if !self.mirrored() {
            return spans;
        }

        let last = self.pixel_width - 1;
        spans
            .into_iter()
            .rev()
            .map(|span| Span {
                start: last - span.end,
                end: last - span.start,
                category: span.category,
            })
            .collect()
    }

    /// Geographic coordinate under a display pixel column, `(lon, lat)` in
    /// signed decimal degrees.
    pub fn position_at(&self, display_x: usize) -> (f64, f64) {
        self.profile
            .position_at(self.data_position(display_x), self.pixel_width)
    }

    /// Switch the viewing direction.
    ///
    /// Only the display-coordinate mirroring changes; bucket data is not
    /// rebuilt. Setting the orientation twice-flipped restores the original
    /// mapping exactly.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Flip the viewing direction.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    /// The current viewing direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The current gap change in meters: how far the water sits above the
    /// baseline the contour heights were measured at.
    pub fn gap_change_m(&self) -> f64 {
        self.resolver.gap_change_m()
    }

    /// The water level reading currently in effect.
    pub fn reading(&self) -> &LevelReading {
        &self.reading
    }

    /// Warnings surfaced by the most recent refresh.
    pub fn last_warnings(&self) -> &[LevelWarning] {
        &self.warnings
    }

    /// Staleness of the current reading at the given instant.
    pub fn freshness(&self, now: DateTime<Utc>) -> Freshness {
        self.reading
            .freshness(now, Duration::milliseconds(self.config.stale_after_ms))
    }

    /// The bathymetry profile, oriented like the contour.
    pub fn depths_m(&self) -> &[f64] {
        &self.depths_m
    }

    /// Meters-per-pixel scale factors.
    pub fn scale(&self) -> ScaleFactors {
        self.scale
    }

    /// The rendered waterway width in pixels.
    pub fn pixel_width(&self) -> usize {
        self.pixel_width
    }

    /// The bucketized contour heights.
    pub fn buckets(&self) -> &HeightBuckets {
        &self.buckets
    }

    /// The session configuration.
    pub fn config(&self) -> &AirGapConfig {
        &self.config
    }

    /// Height in pixels of the rendered bathymetry band: the deepest depth
    /// scaled to pixels, plus the configured bottom padding.
    pub fn depth_height_px(&self) -> u32 {
        let deepest_m = self.depths_m.iter().copied().fold(0.0_f64, f64::min);
        (deepest_m.abs() / self.scale.y).floor() as u32 + self.config.padding.bottom
    }

    /// Height in pixels of the rendered water band for the current gap
    /// change.
    pub fn water_height_px(&self) -> f64 {
        self.depth_height_px() as f64 + self.gap_change_m() / self.scale.y
    }

    fn mirrored(&self) -> bool {
        self.orientation != self.config.initial_orientation
    }

    fn data_position(&self, display_x: usize) -> usize {
        let clamped = display_x.min(self.pixel_width - 1);
        if self.mirrored() {
            self.pixel_width - 1 - clamped
        } else {
            clamped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PassageCategory;
    use airgap_contour::FlowDirection;
    use approx::assert_relative_eq;

    const CONTOUR: &str = r#"{
        "features": [{
            "properties": { "length": 30.0 },
            "geometry": { "coordinates": [[
                [0.0, 0.0, 5.0],
                [1.0, 0.0, 0.0],
                [2.0, 0.0, 5.0]
            ]] }
        }]
    }"#;

    fn tide(value: &str) -> String {
        format!(r#"{{"data": [{{"t": "2024-03-01 12:30", "v": "{}"}}]}}"#, value)
    }

    fn station_config() -> AirGapConfig {
        AirGapConfig {
            base_height_m: 20.0,
            upstream_direction: FlowDirection::WestToEast,
            initial_orientation: Orientation::Upstream,
            ..AirGapConfig::default()
        }
        .with_station("9410170")
    }

    fn session() -> AirGapSession {
        let payload = tide("19.0");
        AirGapSession::new(
            station_config(),
            CONTOUR,
            vec![-2.0, -6.0, -4.0],
            3,
            &LevelPayload::Tide(&payload),
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let session = session();

        assert_relative_eq!(session.gap_change_m(), 1.0);
        assert_eq!(session.value_at(0), Some(4.0));
        assert_eq!(session.value_at(1), Some(0.0));
        assert_eq!(session.value_at(2), Some(4.0));

        let categories: Vec<PassageCategory> = session
            .classify(Some(3.0))
            .iter()
            .map(|span| span.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                PassageCategory::Clear,
                PassageCategory::BlockedByPillar,
                PassageCategory::Clear,
            ]
        );
    }

    #[test]
    fn test_refresh_is_atomic_and_recomputes_gap_change() {
        let mut session = session();

        let payload = tide("18.5");
        let warnings = session.refresh(&LevelPayload::Tide(&payload)).unwrap();
        assert!(warnings.is_empty());

        assert_relative_eq!(session.gap_change_m(), 1.5);
        assert_relative_eq!(session.value_at(0).unwrap(), 3.5);
        assert_eq!(session.value_at(1), Some(0.0));
    }

    #[test]
    fn test_failed_refresh_retains_previous_state() {
        let mut session = session();

        let result = session.refresh(&LevelPayload::Tide("{ not json"));
        assert!(result.is_err());

        assert_relative_eq!(session.gap_change_m(), 1.0);
        assert_eq!(session.value_at(0), Some(4.0));
        assert_eq!(session.reading().air_gap_m, 19.0);
    }

    #[test]
    fn test_degraded_refresh_keeps_previous_reading() {
        let mut session = session();

        let payload = tide("0");
        let warnings = session.refresh(&LevelPayload::Tide(&payload)).unwrap();

        assert_eq!(warnings, &[LevelWarning::DegradedKeepingPrevious]);
        assert_eq!(session.reading().air_gap_m, 19.0);
        assert_relative_eq!(session.gap_change_m(), 1.0);
    }

    #[test]
    fn test_orientation_mirrors_display_positions() {
        let mut session = session();

        let before: Vec<Option<f64>> = (0..3).map(|x| session.value_at(x)).collect();
        let lon_before = session.position_at(0).0;

        session.toggle_orientation();
        let after: Vec<Option<f64>> = (0..3).map(|x| session.value_at(x)).collect();
        let lon_after = session.position_at(0).0;

        assert_eq!(after[0], before[2]);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2], before[0]);
        // Display column 0 now sits over data column 2, two pixel steps
        // along a 0..2 degree span sampled at width 3.
        assert_relative_eq!(lon_before, 0.0, epsilon = 1e-12);
        assert_relative_eq!(lon_after, 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_round_trip_restores_results() {
        let mut session = session();

        let values: Vec<Option<f64>> = (0..3).map(|x| session.value_at(x)).collect();
        let spans = session.classify(Some(3.0));

        session.toggle_orientation();
        session.toggle_orientation();

        let values_after: Vec<Option<f64>> = (0..3).map(|x| session.value_at(x)).collect();
        assert_eq!(values, values_after);
        assert_eq!(spans, session.classify(Some(3.0)));
    }

    #[test]
    fn test_mirrored_spans_are_ascending_and_flipped() {
        let mut session = session();
        session.toggle_orientation();

        let spans = session.classify(Some(10.0));

        // All three columns block a 10 m vessel except the pillar rule on
        // the middle one; spans must still come back in ascending display
        // order.
        assert!(spans.windows(2).all(|pair| pair[0].end < pair[1].start));
        assert_eq!(spans[1].category, PassageCategory::BlockedByPillar);
        assert_eq!(spans[1].start, 1);
    }

    #[test]
    fn test_depths_reversed_with_initial_orientation() {
        // Upstream + east_west flow reverses both contour and depths.
        let config = AirGapConfig {
            base_height_m: 20.0,
            upstream_direction: FlowDirection::EastToWest,
            initial_orientation: Orientation::Upstream,
            ..AirGapConfig::default()
        }
        .with_station("9410170");

        let payload = tide("19.0");
        let session = AirGapSession::new(
            config,
            CONTOUR,
            vec![-2.0, -6.0, -4.0],
            3,
            &LevelPayload::Tide(&payload),
        )
        .unwrap();

        assert_eq!(session.depths_m(), &[-4.0, -6.0, -2.0]);
        // The contour was reversed too, so the first display column now
        // holds the sample that was last.
        assert_eq!(session.value_at(0), Some(4.0));
    }

    #[test]
    fn test_render_band_heights() {
        let session = session();

        // Scale is 30 m / 3 px = 10 m per pixel; deepest depth 6 m floors
        // to 0 px, so only padding remains.
        assert_eq!(session.depth_height_px(), 0);
        assert_relative_eq!(session.water_height_px(), 0.1);
    }

    #[test]
    fn test_contour_failure_is_fatal() {
        let payload = tide("19.0");
        let result = AirGapSession::new(
            station_config(),
            "{ not json",
            Vec::new(),
            3,
            &LevelPayload::Tide(&payload),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_width_is_fatal() {
        let payload = tide("19.0");
        let result = AirGapSession::new(
            station_config(),
            CONTOUR,
            Vec::new(),
            0,
            &LevelPayload::Tide(&payload),
        );
        assert!(result.is_err());
    }
}
