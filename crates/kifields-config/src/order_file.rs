//! The order interchange file.
//!
//! A JSON document holding just the field names in order, for carrying a
//! field ordering between machines or KiCad installs:
//!
//! ```json
//! { "fields": ["MANUFACTURER", "MPN", "COMPONENT_LINK_URL"] }
//! ```
//!
//! Flags never travel in this file; on import they are looked up by name
//! from the list being edited.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default filename offered when exporting.
pub const DEFAULT_EXPORT_FILENAME: &str = "default_fields_order.json";

#[derive(Debug, Error)]
pub enum OrderFileError {
    #[error("Failed to read order file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse order file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOrder {
    pub fields: Vec<String>,
}

impl FieldOrder {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OrderFileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OrderFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| OrderFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILENAME);
        let order = FieldOrder::new(vec!["MANUFACTURER".to_string(), "MPN".to_string()]);

        order.save(&path).unwrap();
        let loaded = FieldOrder::load(&path).unwrap();

        assert_eq!(loaded, order);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();

        let result = FieldOrder::load(dir.path().join("nonexistent.json"));

        assert!(matches!(result, Err(OrderFileError::Read { .. })));
    }

    #[test]
    fn test_load_document_without_fields_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("order.json");
        std::fs::write(&path, r#"{ "names": ["A"] }"#).unwrap();

        let result = FieldOrder::load(&path);

        assert!(matches!(result, Err(OrderFileError::Parse { .. })));
    }

    #[test]
    fn test_load_rejects_non_string_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("order.json");
        std::fs::write(&path, r#"{ "fields": ["A", 7] }"#).unwrap();

        let result = FieldOrder::load(&path);

        assert!(matches!(result, Err(OrderFileError::Parse { .. })));
    }
}
