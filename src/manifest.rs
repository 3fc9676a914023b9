//! JSON manifest access (`package.json` and friends).
//!
//! The manifest is parsed into an order-preserving map so that rewriting the
//! `version` field leaves every other key where it was.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

const VERSION_KEY: &str = "version";

/// A parsed manifest document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Read and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ReleaseError::parse(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
            .map_err(|e| ReleaseError::parse(format!("{}: {}", path.display(), e)))
    }

    /// Parse manifest text; the top level must be a JSON object
    fn from_json(content: &str) -> std::result::Result<Self, String> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(fields)) => Ok(Manifest { fields }),
            Ok(_) => Err("top-level value is not an object".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// The declared `version` string
    pub fn version(&self) -> Result<&str> {
        match self.fields.get(VERSION_KEY) {
            Some(Value::String(version)) => Ok(version.as_str()),
            Some(_) => Err(ReleaseError::parse("\"version\" field is not a string")),
            None => Err(ReleaseError::parse("missing \"version\" field")),
        }
    }

    /// Replace the `version` field in place, keeping its position
    pub fn set_version(&mut self, version: &str) {
        self.fields
            .insert(VERSION_KEY.to_string(), Value::String(version.to_string()));
    }

    /// Render with 2-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.fields)
            .map_err(|e| ReleaseError::parse(e.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Overwrite the manifest at `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Read the current version from the manifest at `path`.
pub fn get_current_version(path: &Path) -> Result<String> {
    let manifest = Manifest::load(path)?;
    Ok(manifest.version()?.to_string())
}

/// Rewrite the manifest at `path` with a new version, returning that version.
pub fn set_version(path: &Path, new_version: &str) -> Result<String> {
    let mut manifest = Manifest::load(path)?;
    manifest.set_version(new_version);
    manifest.save(path)?;
    Ok(new_version.to_string())
}
