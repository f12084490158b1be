//! Loading of fetched payload files.

use crate::{Result, RunnerError};
use airgap_clearance::AirGapConfig;
use std::fs;
use std::path::Path;

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load the session configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<AirGapConfig> {
    let text = read_file(path)?;
    let config: AirGapConfig = serde_yaml::from_str(&text)?;
    Ok(config)
}

/// Load the raw contour payload.
pub fn load_contour(path: &Path) -> Result<String> {
    read_file(path)
}

/// Load the bathymetry depths payload, a JSON array of meters.
pub fn load_depths(path: &Path) -> Result<Vec<f64>> {
    let text = read_file(path)?;
    let depths: Vec<f64> = serde_json::from_str(&text)?;
    Ok(depths)
}

/// Load the raw tide station payload.
pub fn load_tide(path: &Path) -> Result<String> {
    read_file(path)
}

/// Split an `ID=PATH` pair and load the hydrograph payload behind it.
pub fn load_gage(argument: &str) -> Result<(String, String)> {
    let (gage_id, path) = split_gage_argument(argument)?;
    let xml = read_file(Path::new(path))?;
    Ok((gage_id.to_string(), xml))
}

/// Split an `ID=PATH` pair without touching the filesystem.
pub fn split_gage_argument(argument: &str) -> Result<(&str, &str)> {
    match argument.split_once('=') {
        Some((gage_id, path)) if !gage_id.is_empty() && !path.is_empty() => {
            Ok((gage_id, path))
        }
        _ => Err(RunnerError::BadGageArgument(argument.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_gage_argument() {
        let (gage_id, path) = split_gage_argument("STLM7=/tmp/stlm7.xml").unwrap();
        assert_eq!(gage_id, "STLM7");
        assert_eq!(path, "/tmp/stlm7.xml");
    }

    #[test]
    fn test_split_gage_argument_keeps_extra_equals_in_path() {
        let (gage_id, path) = split_gage_argument("A=/tmp/x=1.xml").unwrap();
        assert_eq!(gage_id, "A");
        assert_eq!(path, "/tmp/x=1.xml");
    }

    #[test]
    fn test_split_gage_argument_rejects_bad_shapes() {
        for bad in ["STLM7", "=path", "id=", ""] {
            assert!(
                matches!(
                    split_gage_argument(bad),
                    Err(RunnerError::BadGageArgument(_))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
