//! Configuration loader for structured config files and dotenv files.
//!
//! Responsibilities:
//! - Load a structured config file (TOML/YAML/JSON, detected by extension)
//!   into a caller-supplied `serde::Deserialize` type.
//! - Load a dotenv-style `KEY=VALUE` file into an in-memory map and serve
//!   point lookups from it.
//! - Provide a builder-pattern `Loader` for overriding the default file
//!   locations.
//!
//! Does NOT handle:
//! - Persisting configuration back to disk.
//! - Schema validation beyond what serde deserialization performs.
//! - Watching files for changes; both loads are one-shot synchronous reads.
//!
//! Invariants / Assumptions:
//! - `load_config` and `load_dotenv` are idempotent; a repeated call
//!   re-reads the file and replaces any previously loaded state.
//! - Failures are reported to the caller once per call. The library never
//!   retries and never terminates the process.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file read when no explicit path is configured.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Dotenv file read when no explicit path is configured.
pub const DEFAULT_ENV_PATH: &str = ".env";

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Config file at {path} does not match the destination type: {message}")]
    Deserialize { path: PathBuf, message: String },

    #[error("Unsupported config extension '.{extension}' for file {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Failed to load dotenv file at {path}")]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Loads structured configuration and dotenv key/value pairs from disk.
///
/// The structured file and the dotenv file are independent sources: the
/// former deserializes into a caller-supplied type, the latter fills a flat
/// string map queried through [`Loader::get_dotenv`]. No file handles are
/// held after a load call returns.
pub struct Loader {
    config_path: PathBuf,
    env_path: PathBuf,
    dotenv: HashMap<String, String>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Create a loader pointing at the default file locations.
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            env_path: PathBuf::from(DEFAULT_ENV_PATH),
            dotenv: HashMap::new(),
        }
    }

    /// Override the structured config file path. Last call wins.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Override the dotenv file path. Last call wins.
    pub fn with_env_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_path = path.into();
        self
    }

    /// Returns the configured structured config file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the configured dotenv file path.
    pub fn env_path(&self) -> &Path {
        &self.env_path
    }

    /// Read and deserialize the structured config file into `T`.
    ///
    /// The format is detected from the file extension (`.toml`, `.yaml`,
    /// `.yml`, or `.json`). Field mapping is driven by serde derive
    /// attributes on `T`, including nested structs and optional sections.
    ///
    /// # Errors
    /// - [`ConfigError::Read`] when the file is missing or unreadable.
    /// - [`ConfigError::Parse`] when the file is not valid in its format.
    /// - [`ConfigError::Deserialize`] when a value cannot convert to the
    ///   destination field's type.
    /// - [`ConfigError::UnsupportedFormat`] for unknown extensions.
    pub fn load_config<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let content =
            std::fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Read {
                path: self.config_path.clone(),
                source,
            })?;

        let extension = self
            .config_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => self.parse_toml(&content),
            "yaml" | "yml" => self.parse_yaml(&content),
            "json" => self.parse_json(&content),
            other => Err(ConfigError::UnsupportedFormat {
                path: self.config_path.clone(),
                extension: other.to_string(),
            }),
        }
    }

    /// Like [`Loader::load_config`], but falls back to `T::default()` on
    /// any failure instead of returning an error.
    pub fn load_config_or_default<T: DeserializeOwned + Default>(&self) -> T {
        match self.load_config() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Failed to load config, using defaults"
                );
                T::default()
            }
        }
    }

    // Parse to a generic value first so syntax errors and type mismatches
    // surface as distinct error variants.
    fn parse_toml<T: DeserializeOwned>(&self, content: &str) -> Result<T, ConfigError> {
        let raw: toml::Value = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: self.config_path.clone(),
            message: e.to_string(),
        })?;
        raw.try_into()
            .map_err(|e: toml::de::Error| ConfigError::Deserialize {
                path: self.config_path.clone(),
                message: e.to_string(),
            })
    }

    fn parse_yaml<T: DeserializeOwned>(&self, content: &str) -> Result<T, ConfigError> {
        let raw: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                path: self.config_path.clone(),
                message: e.to_string(),
            })?;
        serde_yaml::from_value(raw).map_err(|e| ConfigError::Deserialize {
            path: self.config_path.clone(),
            message: e.to_string(),
        })
    }

    fn parse_json<T: DeserializeOwned>(&self, content: &str) -> Result<T, ConfigError> {
        let raw: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                path: self.config_path.clone(),
                message: e.to_string(),
            })?;
        serde_json::from_value(raw).map_err(|e| ConfigError::Deserialize {
            path: self.config_path.clone(),
            message: e.to_string(),
        })
    }

    /// Read the dotenv file into the internal key/value map.
    ///
    /// Replaces any map from a previous call. A missing or malformed file
    /// is reported as [`ConfigError::Dotenv`]; the previous map is kept in
    /// that case. Process environment variables are not modified.
    pub fn load_dotenv(&mut self) -> Result<(), ConfigError> {
        let iter = dotenvy::from_path_iter(&self.env_path).map_err(|source| {
            ConfigError::Dotenv {
                path: self.env_path.clone(),
                source,
            }
        })?;

        let mut vars = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|source| ConfigError::Dotenv {
                path: self.env_path.clone(),
                source,
            })?;
            vars.insert(key, value);
        }

        tracing::debug!(
            path = %self.env_path.display(),
            count = vars.len(),
            "Loaded dotenv file"
        );
        self.dotenv = vars;
        Ok(())
    }

    /// Look up a key loaded by [`Loader::load_dotenv`].
    ///
    /// Returns `None` for keys the dotenv file did not define. Pure lookup,
    /// no side effects.
    pub fn get_dotenv(&self, key: &str) -> Option<&str> {
        self.dotenv.get(key).map(String::as_str)
    }
}
