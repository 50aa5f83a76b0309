//! Configuration loading for corekit applications.
//!
//! This crate provides a small loader that reads a structured config file
//! (TOML, YAML, or JSON) into a caller-supplied serde type, and a separate
//! dotenv loader with point lookups into the parsed key/value map.

mod loader;

pub use loader::{ConfigError, DEFAULT_CONFIG_PATH, DEFAULT_ENV_PATH, Loader};
