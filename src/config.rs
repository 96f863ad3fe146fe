//! Configuration handling for woformat.
//! Loads the description of a project's generated files from JSON or YAML.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::line_ending::LineEnding;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

/// One generated file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// Output path, relative to the output directory
    pub path: String,
    /// Template identifier, resolved by the resource loader
    pub template: String,
    /// Tokens for this target only; they take precedence over shared ones
    #[serde(default)]
    pub filters: IndexMap<String, String>,
    /// Copy the template byte for byte, ignoring every filter
    #[serde(default)]
    pub raw: bool,
}

/// Project-level configuration, read from `woformat.json` / `woformat.yml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FormatConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub has_classes: bool,
    /// External libraries listed after the project's own archive
    #[serde(default)]
    pub libs: Vec<String>,
    #[serde(default)]
    pub line_ending: LineEnding,
    /// Whether `@NAME@`, `@JAR_ARRAY@` and friends are available to templates
    #[serde(default = "default_true")]
    pub standard_filters: bool,
    /// Tokens shared by every filtered target
    #[serde(default)]
    pub filters: IndexMap<String, String>,
    pub targets: Vec<TargetConfig>,
}

/// Locates the configuration file.
///
/// # Arguments
/// * `path` - Either a configuration file or a directory containing one of
///   [`CONFIG_FILES`]
///
/// # Errors
/// * `Error::ConfigError` if no configuration file exists
pub fn find_config<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.is_dir() {
        for file in CONFIG_FILES {
            let config_path = path.join(file);
            if config_path.is_file() {
                return Ok(config_path);
            }
        }
        return Err(Error::ConfigError(format!(
            "No configuration file found in {} (tried: {})",
            path.display(),
            CONFIG_FILES.join(", ")
        )));
    }
    Err(Error::ConfigError(format!(
        "Invalid configuration path: {}",
        path.display()
    )))
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> Result<FormatConfig> {
    let config: FormatConfig = match serde_json::from_str(content) {
        Ok(config) => config,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };

    if config.name.trim().is_empty() {
        return Err(Error::ConfigError("Project name must not be empty".to_string()));
    }
    Ok(config)
}

/// Finds, reads and parses the configuration.
///
/// # Returns
/// * `(FormatConfig, PathBuf)` - Parsed configuration and the directory it was found in
pub fn get_config<P: AsRef<Path>>(path: P) -> Result<(FormatConfig, PathBuf)> {
    let config_path = find_config(path)?;
    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(&config_path).map_err(Error::IoError)?;
    let config = parse_config(&content)?;
    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok((config, config_dir))
}
