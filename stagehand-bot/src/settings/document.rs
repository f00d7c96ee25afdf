//! Settings document persistence
//!
//! The editor settings file is an arbitrary JSON object owned by the
//! editor; this bot only ever touches three keys. Every write serializes
//! the full document (4-space indent, key order preserved) so unrelated
//! keys survive untouched.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use stagehand_utils::{Result, StagehandError};

/// An editor settings document held in memory between read and write
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDocument {
    root: Map<String, Value>,
}

impl SettingsDocument {
    /// Read and parse the settings file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StagehandError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let value: Value =
            serde_json::from_str(&text).map_err(|e| StagehandError::SettingsParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(StagehandError::SettingsNotObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Serialize the full document and write it back
    ///
    /// The write only happens once the whole rendered document exists in
    /// memory; a serialization failure leaves the file untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = self.render()?;
        std::fs::write(path, rendered).map_err(|e| StagehandError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Render with 4-space indentation, keys in their existing order
    fn render(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut ser)
            .map_err(|e| StagehandError::internal(format!("settings render failed: {}", e)))?;
        Ok(buf)
    }

    /// String value of a top-level key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.root.get(key).and_then(Value::as_str)
    }

    /// Integer value of a top-level key
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.root.get(key).and_then(Value::as_i64)
    }

    /// Set a top-level key
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.root.insert(key.to_string(), value.into());
    }
}
