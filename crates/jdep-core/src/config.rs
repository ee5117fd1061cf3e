//! Configuration loading for jdep.
//!
//! Two sources are supported: `jdep.json` inside a configuration directory, and
//! a properties-style file in the classic layout:
//!
//! ```text
//! # packages to leave out of the analysis
//! ignore.java=java.*,javax.*
//! ignore.vendor=com.sun.*
//! analyzeInnerClasses=false
//! components=com.acme.core,com.acme.ui
//! com.acme.thirdparty=0
//! ```
//!
//! Keys starting with `ignore` hold comma-separated filter patterns; any other
//! unrecognized key whose value is an integer is a volatility override.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::PackageFilter;
use crate::graph::GraphOptions;

pub const CONFIG_FILE_NAME: &str = "jdep.json";

/// Top-level jdep configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdepConfig {
    /// Package filter patterns to exclude.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Package prefixes that coalesce all their sub-packages into one node.
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default = "default_true")]
    pub analyze_inner_classes: bool,
    /// Per-package volatility overrides.
    #[serde(default)]
    pub volatility: BTreeMap<String, u32>,
    #[serde(default)]
    pub allow_self_dependency: bool,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

fn default_true() -> bool {
    true
}

impl Default for JdepConfig {
    fn default() -> Self {
        Self {
            ignore: vec![],
            components: vec![],
            analyze_inner_classes: true,
            volatility: BTreeMap::new(),
            allow_self_dependency: false,
        }
    }
}

impl JdepConfig {
    /// Load `jdep.json` from `config_dir`. A missing file yields the defaults;
    /// an unreadable or malformed one is an error.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_json(&path)
    }

    pub fn load_json(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_properties(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_properties(&content)
    }

    /// Load a configuration file, choosing the format by extension
    /// (`.json` is JSON, anything else is read as properties).
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load_properties(path),
        }
    }

    /// Parse properties-style text.
    pub fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once(['=', ':']) else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            if key.starts_with("ignore") {
                for pattern in split_list(value) {
                    if !config.ignore.contains(&pattern) {
                        config.ignore.push(pattern);
                    }
                }
            } else if key == "analyzeInnerClasses" {
                config.analyze_inner_classes = parse_bool(key, value)?;
            } else if key == "allowSelfDependency" {
                config.allow_self_dependency = parse_bool(key, value)?;
            } else if key == "components" {
                config.components = split_list(value);
            } else if let Ok(volatility) = value.parse::<u32>() {
                config.volatility.insert(key.to_string(), volatility);
            }
        }

        Ok(config)
    }

    /// Package filter excluding the configured `ignore` patterns.
    pub fn package_filter(&self) -> PackageFilter {
        PackageFilter::all().excluding(self.ignore.iter().cloned())
    }

    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            allow_self_dependency: self.allow_self_dependency,
        }
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
