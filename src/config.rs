use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::{ReleaseError, Result};

/// Project-local configuration file name
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for a release.
///
/// Every field is optional in the file; missing values fall back to the
/// conventions of a plain `package.json` project pushed to `origin`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Manifest path, relative to the project root
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Remote that receives the release commit and tag
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "chore: bump version to {version}".to_string()
}

fn default_tag_message() -> String {
    "Release v{version}".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            tag_message: default_tag_message(),
        }
    }
}

impl Config {
    /// Absolute location of the manifest under the project root
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest)
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.as_str())
    }

    pub fn commit_message(&self) -> Result<TagPattern> {
        TagPattern::new(self.commit_message.as_str())
    }

    pub fn tag_message(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_message.as_str())
    }

    /// Check every template up front so a bad config fails before any work
    pub fn validate(&self) -> Result<()> {
        if self.manifest.trim().is_empty() {
            return Err(ReleaseError::config("manifest path must not be empty"));
        }
        if self.remote.trim().is_empty() {
            return Err(ReleaseError::config("remote must not be empty"));
        }
        self.tag_pattern()?;
        self.commit_message()?;
        self.tag_message()?;
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in the project root
/// 3. `.release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `root` - Project root directory
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(root: &Path, config_path: Option<&str>) -> Result<Config> {
    let source = if let Some(path) = config_path {
        Some(PathBuf::from(path))
    } else if root.join(CONFIG_FILE_NAME).exists() {
        Some(root.join(CONFIG_FILE_NAME))
    } else {
        dirs::config_dir()
            .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
            .filter(|path| path.exists())
    };

    let config = match source {
        Some(path) => {
            let config_str = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            toml::from_str::<Config>(&config_str).map_err(|e| {
                ReleaseError::config(format!(
                    "cannot parse {}: {}",
                    path.display(),
                    e.message()
                ))
            })?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}
