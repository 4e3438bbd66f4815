use std::path::{Path, PathBuf};

use dronewatch_shared::models::Record;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The record fixture served by the data endpoint.
pub struct Assets {
    pub records: Vec<Record>,
}

impl Assets {
    pub fn load(assets_dir: &Path) -> Result<Self, AssetError> {
        let path = assets_dir.join("records.json");
        let data = std::fs::read_to_string(&path).map_err(|source| AssetError::Read {
            path: path.clone(),
            source,
        })?;
        let records: Vec<Record> =
            serde_json::from_str(&data).map_err(|source| AssetError::Parse { path, source })?;

        tracing::info!(records = records.len(), "Loaded record fixture");

        Ok(Assets { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_bundled_fixture() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets");
        let assets = Assets::load(&dir).unwrap();
        assert_eq!(assets.records.len(), 5);
        assert_eq!(assets.records[0].person_count, 4);
        assert_eq!(assets.records[4].person_count, 5);
    }

    #[test]
    fn test_missing_fixture_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Assets::load(dir.path()).err().unwrap();
        assert!(matches!(err, AssetError::Read { .. }));
    }

    #[test]
    fn test_malformed_fixture_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("records.json"), r#"[{"jumlah_orang": "many"}]"#).unwrap();
        let err = Assets::load(dir.path()).err().unwrap();
        assert!(matches!(err, AssetError::Parse { .. }));
    }
}
