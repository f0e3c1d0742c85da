//! Access to the Eeschema preferences file.
//!
//! Everything that touches the filesystem lives here: resolving where
//! `eeschema.json` is, reading the JSON document, swapping the
//! `drawing.field_names` string in and out, and writing the document back
//! with a `.bak` copy of the previous version. The document itself is
//! kept as an untyped [`serde_json::Value`] so every other preferences
//! key rides along untouched.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod order_file;

/// Filename of the Eeschema preferences file.
pub const PREFERENCES_FILE: &str = "eeschema.json";

/// KiCad settings directory version this tool targets.
const KICAD_VERSION_DIR: &str = "9.0";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences file not found at {path}")]
    Missing { path: PathBuf },

    #[error("Failed to read preferences file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse preferences file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Preferences file at {path} is not a JSON object")]
    NotAnObject { path: PathBuf },
}

/// A loaded `eeschema.json` document.
#[derive(Debug)]
pub struct Preferences {
    path: PathBuf,
    document: Value,
}

impl Preferences {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PreferencesError::Missing {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|source| PreferencesError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|source| PreferencesError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if !document.is_object() {
            return Err(PreferencesError::NotAnObject {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw `drawing.field_names` value, or `""` when the key (or the
    /// whole `drawing` object) is absent. A fresh install has neither,
    /// and an empty string parses to an empty field list.
    pub fn field_names(&self) -> &str {
        self.document
            .get("drawing")
            .and_then(|drawing| drawing.get("field_names"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Replace `drawing.field_names`, creating the `drawing` object when
    /// the file does not have one yet. A non-object `drawing` value is
    /// replaced wholesale.
    pub fn set_field_names(&mut self, sexpr: &str) {
        let Some(root) = self.document.as_object_mut() else {
            return; // load() guarantees an object
        };
        let drawing = root
            .entry("drawing")
            .or_insert_with(|| Value::Object(Default::default()));
        if !drawing.is_object() {
            *drawing = Value::Object(Default::default());
        }
        if let Some(drawing) = drawing.as_object_mut() {
            drawing.insert("field_names".to_string(), Value::String(sexpr.to_string()));
        }
    }

    /// Write the document back as 2-space-indented JSON, copying the
    /// current file to `<path>.bak` first. A failed backup copy does not
    /// block the save; the backup path is returned when one was made.
    pub fn save(&self) -> anyhow::Result<Option<PathBuf>> {
        let backup = self.backup_path();
        let backup_made = std::fs::copy(&self.path, &backup).is_ok();

        let content = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(&self.path, content)?;

        Ok(backup_made.then_some(backup))
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }
}

/// Resolve the user's `eeschema.json`.
///
/// `KICAD_CONFIG_HOME` wins when it names a directory containing the
/// file; otherwise the platform default for KiCad 9.0 is tried. Returns
/// `None` when nothing exists so the caller can ask the user for a path.
pub fn preferences_path() -> Option<PathBuf> {
    if let Ok(config_home) = std::env::var("KICAD_CONFIG_HOME") {
        let dir = shellexpand::tilde(&config_home);
        let candidate = Path::new(dir.as_ref()).join(PREFERENCES_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    default_preferences_path().filter(|path| path.is_file())
}

fn default_preferences_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").ok()?;
        Some(
            Path::new(&appdata)
                .join("kicad")
                .join(KICAD_VERSION_DIR)
                .join(PREFERENCES_FILE),
        )
    } else if cfg!(target_os = "macos") {
        let prefs = shellexpand::tilde("~/Library/Preferences");
        Some(
            Path::new(prefs.as_ref())
                .join("kicad")
                .join(KICAD_VERSION_DIR)
                .join(PREFERENCES_FILE),
        )
    } else {
        let config = shellexpand::tilde("~/.config");
        Some(
            Path::new(config.as_ref())
                .join("kicad")
                .join(KICAD_VERSION_DIR)
                .join(PREFERENCES_FILE),
        )
    }
}
