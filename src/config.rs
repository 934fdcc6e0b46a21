//! Configuration module for tagtree
//!
//! Settings live in `config.toml` under the user's config directory and can
//! be overridden with `TAGTREE_*` environment variables (for example
//! `TAGTREE_CACHE_FILE`). A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::tagger::DEFAULT_TAG_PROGRAM;

/// Keys accepted by `config set` and `config get`
pub const KEYS: &[&str] = &[
    "cache_file",
    "tag_program",
    "ignore_case",
    "date_sort",
    "min_depth",
    "quiet",
];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TagtreeConfig {
    /// File holding the cached trees
    pub cache_file: PathBuf,

    /// Program used to list tags
    pub tag_program: String,

    /// Match search names case-insensitively
    pub ignore_case: bool,

    /// Order search results by embedded date stamps
    pub date_sort: bool,

    /// Default minimum depth of search results
    pub min_depth: usize,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for TagtreeConfig {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            tag_program: DEFAULT_TAG_PROGRAM.to_string(),
            ignore_case: true,
            date_sort: true,
            min_depth: 0,
            quiet: false,
        }
    }
}

/// `<cache dir>/tagtree/cache.bin`, or `./tagtree-cache.bin` without one
#[must_use]
pub fn default_cache_file() -> PathBuf {
    dirs::cache_dir().map_or_else(
        || PathBuf::from("tagtree-cache.bin"),
        |dir| dir.join("tagtree").join("cache.bin"),
    )
}

impl TagtreeConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("tagtree").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("TAGTREE"))
            .build()?
            .try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Current value of `key` as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        Some(match key {
            "cache_file" => self.cache_file.display().to_string(),
            "tag_program" => self.tag_program.clone(),
            "ignore_case" => self.ignore_case.to_string(),
            "date_sort" => self.date_sort.to_string(),
            "min_depth" => self.min_depth.to_string(),
            "quiet" => self.quiet.to_string(),
            _ => return None,
        })
    }

    /// Set `key` from text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "cache_file" => self.cache_file = PathBuf::from(value),
            "tag_program" => self.tag_program = value.to_string(),
            "ignore_case" => self.ignore_case = parse_value(key, value)?,
            "date_sort" => self.date_sort = parse_value(key, value)?,
            "min_depth" => self.min_depth = parse_value(key, value)?,
            "quiet" => self.quiet = parse_value(key, value)?,
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))
}
