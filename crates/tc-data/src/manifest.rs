//! The data directory manifest, `torchcrawl.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// File name of the manifest inside a data directory.
pub const MANIFEST_FILE: &str = "torchcrawl.json";

/// Paths of the individual data files, relative to the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFiles {
    /// Zone definitions.
    pub zones: String,
    /// Encounter catalog.
    pub encounters: String,
    /// Weather types and effects.
    pub weathers: String,
    /// Rest check tables.
    pub rest_info: String,
    /// Encounter weight matrix by zone.
    pub encounter_by_zone: String,
    /// Weather weight matrix by season.
    pub weather_by_season: String,
    /// Calendar definition, optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,
}

/// The manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Data file paths.
    pub files: ManifestFiles,
}

impl Manifest {
    /// Read `torchcrawl.json` from a data directory.
    pub fn load(dir: &Path) -> DataResult<Self> {
        let path = dir.join(MANIFEST_FILE);
        read_json(&path)
    }

    /// Resolve a manifest-relative path against the data directory.
    pub fn resolve(dir: &Path, file: &str) -> PathBuf {
        dir.join(file)
    }
}

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> DataResult<T> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| DataError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_is_optional() {
        let json = r#"{"files": {
            "zones": "zones.json", "encounters": "encounters.json",
            "weathers": "weathers.json", "rest_info": "rest.json",
            "encounter_by_zone": "ebz.json", "weather_by_season": "wbs.json"
        }}"#;
        let m: Manifest = serde_json::from_str(json).unwrap();
        assert!(m.files.calendar.is_none());
        assert_eq!(m.files.zones, "zones.json");
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn malformed_manifest_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{\"files\": 3}").unwrap();
        let err = Manifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }

    #[test]
    fn resolve_joins() {
        let p = Manifest::resolve(Path::new("/data"), "zones.json");
        assert_eq!(p, PathBuf::from("/data/zones.json"));
    }
}
