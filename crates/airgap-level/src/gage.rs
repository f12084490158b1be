//! River gage hydrograph payloads and gage-based air gap computation.
//!
//! Hydrograph services return XML; the reading of interest is the text of
//! the first `<primary>` element (stage height in feet) and its `<valid>`
//! timestamp. A document without a parseable `<primary>` marks that gage
//! down: the gage is excluded from computation and named in a warning, and
//! the math degrades to the next-simpler variant.

use crate::source::{LevelUpdate, LevelWarning};
use crate::{LevelError, LevelReading, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

/// Conversion factor from gage feet to meters.
pub const FEET_TO_METERS: f64 = 0.3048;

/// Air gap reference from a single gage level.
pub fn single_gage_air_gap(base_height_m: f64, adjustment_m: f64, level_m: f64) -> f64 {
    base_height_m - adjustment_m - level_m
}

/// Air gap reference interpolated between two gages bracketing the bridge.
///
/// `distances_m[0]` is the distance from the first gage to the bridge,
/// `distances_m[1]` from the bridge to the second gage. The water surface
/// is assumed to slope linearly between the gages; the level at the bridge
/// is extrapolated from the first gage by that slope.
pub fn dual_gage_air_gap(
    base_height_m: f64,
    adjustment_m: f64,
    level1_m: f64,
    level2_m: f64,
    distances_m: [f64; 2],
) -> f64 {
    let total_distance_m = distances_m[0] + distances_m[1];
    let change_per_meter = (level2_m - level1_m) / total_distance_m;
    let level_at_bridge_m = level1_m + change_per_meter * distances_m[0];

    base_height_m - adjustment_m - level_at_bridge_m
}

/// The fields extracted from one hydrograph XML payload.
#[derive(Debug, Clone, PartialEq)]
pub struct GageDocument {
    /// Stage height in feet from the first `<primary>` element, `None`
    /// when the element is absent or unparseable.
    pub primary_ft: Option<f64>,
    /// Timestamp from the first `<valid>` element, `None` when absent or
    /// unparseable.
    pub observed_at: Option<DateTime<Utc>>,
}

impl GageDocument {
    /// Extract the first `<primary>` and `<valid>` elements from a
    /// hydrograph payload.
    ///
    /// Malformed XML is an error; well-formed XML without the expected
    /// elements yields a document that reports the gage as down.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut primary_ft = None;
        let mut observed_at = None;

        loop {
            match reader.read_event()? {
                Event::Start(element) => match element.name().as_ref() {
                    b"primary" if primary_ft.is_none() => {
                        let text = reader.read_text(element.name())?;
                        primary_ft = text.trim().parse::<f64>().ok();
                    }
                    b"valid" if observed_at.is_none() => {
                        let text = reader.read_text(element.name())?;
                        observed_at = parse_timestamp(text.trim());
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self {
            primary_ft,
            observed_at,
        })
    }

    /// Whether this gage failed to report a primary reading.
    pub fn is_down(&self) -> bool {
        self.primary_ft.is_none()
    }

    /// The stage height converted to meters.
    pub fn level_m(&self) -> Option<f64> {
        self.primary_ft.map(|feet| feet * FEET_TO_METERS)
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|fixed| fixed.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn find_document<'a>(payloads: &'a [(String, String)], gage_id: &str) -> Option<&'a str> {
    payloads
        .iter()
        .find(|(id, _)| id == gage_id)
        .map(|(_, xml)| xml.as_str())
}

/// One river gage near the bridge.
#[derive(Debug, Clone)]
pub struct SingleGageSource {
    gage_id: String,
    base_height_m: f64,
    adjustment_m: f64,
    previous: Option<LevelReading>,
}

impl SingleGageSource {
    /// Create a source for the given gage.
    pub fn new(gage_id: impl Into<String>, base_height_m: f64, adjustment_m: f64) -> Self {
        Self {
            gage_id: gage_id.into(),
            base_height_m,
            adjustment_m,
            previous: None,
        }
    }

    /// The most recent reading, if any refresh has completed.
    pub fn current(&self) -> Option<&LevelReading> {
        self.previous.as_ref()
    }

    /// Ingest hydrograph payloads keyed by gage id.
    ///
    /// A down or missing gage degrades to the no-gage formula and is named
    /// in the returned warning.
    pub fn ingest(&mut self, payloads: &[(String, String)]) -> Result<LevelUpdate> {
        let document = match find_document(payloads, &self.gage_id) {
            Some(xml) => GageDocument::parse(xml)?,
            None => GageDocument {
                primary_ft: None,
                observed_at: None,
            },
        };

        let update = match document.level_m() {
            Some(level_m) => LevelUpdate {
                reading: LevelReading {
                    air_gap_m: single_gage_air_gap(self.base_height_m, self.adjustment_m, level_m),
                    observed_at: document.observed_at,
                    valid: true,
                },
                warnings: Vec::new(),
            },
            None => {
                warn!(gage = %self.gage_id, "gage down, using no-gage fallback");
                LevelUpdate {
                    reading: LevelReading {
                        air_gap_m: self.base_height_m - self.adjustment_m,
                        observed_at: None,
                        valid: true,
                    },
                    warnings: vec![LevelWarning::GagesDown(vec![self.gage_id.clone()])],
                }
            }
        };

        self.previous = Some(update.reading);
        Ok(update)
    }
}

/// Two river gages bracketing the bridge, interpolated by distance.
#[derive(Debug, Clone)]
pub struct DualGageSource {
    gage_ids: [String; 2],
    distances_m: [f64; 2],
    base_height_m: f64,
    adjustment_m: f64,
    previous: Option<LevelReading>,
}

impl DualGageSource {
    /// Create a source for a gage pair.
    ///
    /// `distances_m` holds first-gage-to-bridge and bridge-to-second-gage
    /// distances; their sum must be positive.
    pub fn new(
        gage_ids: [String; 2],
        distances_m: [f64; 2],
        base_height_m: f64,
        adjustment_m: f64,
    ) -> Result<Self> {
        if distances_m[0] + distances_m[1] <= 0.0 {
            return Err(LevelError::ZeroGageDistance);
        }
        Ok(Self {
            gage_ids,
            distances_m,
            base_height_m,
            adjustment_m,
            previous: None,
        })
    }

    /// The most recent reading, if any refresh has completed.
    pub fn current(&self) -> Option<&LevelReading> {
        self.previous.as_ref()
    }

    /// Ingest hydrograph payloads keyed by gage id.
    ///
    /// Down gages are excluded: with one gage remaining the single-gage
    /// formula is applied to it, with none the no-gage formula.
    pub fn ingest(&mut self, payloads: &[(String, String)]) -> Result<LevelUpdate> {
        let mut documents = Vec::with_capacity(2);
        for gage_id in &self.gage_ids {
            let document = match find_document(payloads, gage_id) {
                Some(xml) => GageDocument::parse(xml)?,
                None => GageDocument {
                    primary_ft: None,
                    observed_at: None,
                },
            };
            documents.push(document);
        }

        let down: Vec<String> = self
            .gage_ids
            .iter()
            .zip(&documents)
            .filter(|(_, document)| document.is_down())
            .map(|(id, _)| id.clone())
            .collect();

        let reading = match (documents[0].level_m(), documents[1].level_m()) {
            (Some(level1_m), Some(level2_m)) => LevelReading {
                air_gap_m: dual_gage_air_gap(
                    self.base_height_m,
                    self.adjustment_m,
                    level1_m,
                    level2_m,
                    self.distances_m,
                ),
                observed_at: documents[0].observed_at,
                valid: true,
            },
            (Some(level_m), None) => LevelReading {
                air_gap_m: single_gage_air_gap(self.base_height_m, self.adjustment_m, level_m),
                observed_at: documents[0].observed_at,
                valid: true,
            },
            (None, Some(level_m)) => LevelReading {
                air_gap_m: single_gage_air_gap(self.base_height_m, self.adjustment_m, level_m),
                observed_at: documents[1].observed_at,
                valid: true,
            },
            (None, None) => LevelReading {
                air_gap_m: self.base_height_m - self.adjustment_m,
                observed_at: None,
                valid: true,
            },
        };

        let warnings = if down.is_empty() {
            Vec::new()
        } else {
            warn!(gages = ?down, "gages down, degrading computation");
            vec![LevelWarning::GagesDown(down)]
        };

        self.previous = Some(reading);
        Ok(LevelUpdate { reading, warnings })
    }
}

/// No live data configured; the reference never moves.
#[derive(Debug, Clone)]
pub struct NoGageSource {
    base_height_m: f64,
    adjustment_m: f64,
}

impl NoGageSource {
    /// Create the constant source.
    pub fn new(base_height_m: f64, adjustment_m: f64) -> Self {
        Self {
            base_height_m,
            adjustment_m,
        }
    }

    /// The constant reading; no timestamp validity to track.
    pub fn reading(&self) -> LevelReading {
        LevelReading {
            air_gap_m: self.base_height_m - self.adjustment_m,
            observed_at: None,
            valid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn hydrograph(primary: &str) -> String {
        format!(
            r#"<site>
                <observed>
                    <datum>
                        <valid timezone="UTC">2024-03-01T10:30:00-00:00</valid>
                        <primary name="Stage" units="ft">{}</primary>
                        <secondary name="Flow" units="kcfs">12.1</secondary>
                    </datum>
                </observed>
            </site>"#,
            primary
        )
    }

    const NO_PRIMARY: &str = "<site><observed><datum>\
        <valid timezone=\"UTC\">2024-03-01T10:30:00-00:00</valid>\
        </datum></observed></site>";

    #[test]
    fn test_parse_hydrograph() {
        let document = GageDocument::parse(&hydrograph("12.5")).unwrap();

        assert_eq!(document.primary_ft, Some(12.5));
        assert_relative_eq!(document.level_m().unwrap(), 3.81, epsilon = 1e-12);
        assert_eq!(
            document.observed_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_primary_marks_gage_down() {
        let document = GageDocument::parse(NO_PRIMARY).unwrap();
        assert!(document.is_down());
    }

    #[test]
    fn test_unparseable_primary_marks_gage_down() {
        let document = GageDocument::parse(&hydrograph("--")).unwrap();
        assert!(document.is_down());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = GageDocument::parse("<site><primary>12.5</site>");
        assert!(matches!(result, Err(LevelError::Xml(_))));
    }

    #[test]
    fn test_single_gage_formula() {
        assert_relative_eq!(single_gage_air_gap(22.0, 1.5, 3.81), 16.69, epsilon = 1e-12);
    }

    #[test]
    fn test_dual_gage_formula() {
        // Levels 10 m and 12 m over a 100 m total span rise 0.02 m/m; the
        // bridge sits 30 m past the first gage.
        let air_gap = dual_gage_air_gap(20.0, 1.0, 10.0, 12.0, [30.0, 70.0]);
        assert_relative_eq!(air_gap, 20.0 - 1.0 - (10.0 + 0.02 * 30.0), epsilon = 1e-12);
        assert_relative_eq!(air_gap, 8.4, epsilon = 1e-12);
    }

    #[test]
    fn test_single_gage_ingest() {
        let mut source = SingleGageSource::new("STLM7", 22.0, 1.5);
        let payloads = vec![("STLM7".to_string(), hydrograph("12.5"))];

        let update = source.ingest(&payloads).unwrap();

        assert_relative_eq!(update.reading.air_gap_m, 22.0 - 1.5 - 3.81, epsilon = 1e-12);
        assert!(update.warnings.is_empty());
        assert!(update.reading.observed_at.is_some());
    }

    #[test]
    fn test_single_gage_down_degrades_to_no_gage() {
        let mut source = SingleGageSource::new("STLM7", 22.0, 1.5);
        let payloads = vec![("STLM7".to_string(), NO_PRIMARY.to_string())];

        let update = source.ingest(&payloads).unwrap();

        assert_relative_eq!(update.reading.air_gap_m, 20.5);
        assert_eq!(update.reading.observed_at, None);
        assert_eq!(
            update.warnings,
            vec![LevelWarning::GagesDown(vec!["STLM7".to_string()])]
        );
    }

    #[test]
    fn test_single_gage_missing_payload_counts_as_down() {
        let mut source = SingleGageSource::new("STLM7", 22.0, 1.5);

        let update = source.ingest(&[]).unwrap();

        assert_eq!(
            update.warnings,
            vec![LevelWarning::GagesDown(vec!["STLM7".to_string()])]
        );
    }

    fn dual_source() -> DualGageSource {
        DualGageSource::new(
            ["GRFM7".to_string(), "CAGM7".to_string()],
            [30.0, 70.0],
            20.0,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_dual_gage_ingest_interpolates() {
        let mut source = dual_source();
        // 10 m and 12 m expressed in feet.
        let payloads = vec![
            ("GRFM7".to_string(), hydrograph(&format!("{}", 10.0 / FEET_TO_METERS))),
            ("CAGM7".to_string(), hydrograph(&format!("{}", 12.0 / FEET_TO_METERS))),
        ];

        let update = source.ingest(&payloads).unwrap();

        assert_relative_eq!(update.reading.air_gap_m, 8.4, epsilon = 1e-9);
        assert!(update.warnings.is_empty());
    }

    #[test]
    fn test_dual_gage_one_down_uses_remaining_gage() {
        let mut source = dual_source();
        let payloads = vec![
            ("GRFM7".to_string(), NO_PRIMARY.to_string()),
            ("CAGM7".to_string(), hydrograph(&format!("{}", 12.0 / FEET_TO_METERS))),
        ];

        let update = source.ingest(&payloads).unwrap();

        assert_relative_eq!(update.reading.air_gap_m, 20.0 - 1.0 - 12.0, epsilon = 1e-9);
        assert_eq!(
            update.warnings,
            vec![LevelWarning::GagesDown(vec!["GRFM7".to_string()])]
        );
    }

    #[test]
    fn test_dual_gage_all_down_degrades_to_no_gage() {
        let mut source = dual_source();

        let update = source.ingest(&[]).unwrap();

        assert_relative_eq!(update.reading.air_gap_m, 19.0);
        assert_eq!(
            update.warnings,
            vec![LevelWarning::GagesDown(vec![
                "GRFM7".to_string(),
                "CAGM7".to_string()
            ])]
        );
    }

    #[test]
    fn test_dual_gage_rejects_zero_distance() {
        let result = DualGageSource::new(
            ["A".to_string(), "B".to_string()],
            [0.0, 0.0],
            20.0,
            1.0,
        );
        assert!(matches!(result, Err(LevelError::ZeroGageDistance)));
    }

    #[test]
    fn test_no_gage_reading_is_constant() {
        let source = NoGageSource::new(22.0, 1.5);
        let reading = source.reading();

        assert_relative_eq!(reading.air_gap_m, 20.5);
        assert_eq!(reading.observed_at, None);
        assert!(reading.valid);
    }
}
