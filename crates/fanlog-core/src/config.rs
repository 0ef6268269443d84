//! Configuration management for fanlog.
//!
//! This module provides multi-layer configuration support with:
//! - File-based configuration (YAML)
//! - Environment variable overrides
//! - Programmatic updates
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use fanlog_core::config::Config;
//!
//! let mut config = Config::load("fanlog.yml")?
//!     .with_env_overrides("FANLOG");
//!
//! config.set("default_logger", "worker")?;
//!
//! let logging = config.logging()?;
//! assert_eq!(logging.default_logger, "worker");
//! # Ok::<(), fanlog_core::FanlogError>(())
//! ```

use crate::util::data::{deep_merge, load_yaml};
use fanlog_types::{bug, FanlogError, LoggingConfig, Result, DEFAULT_LOGGER_NAME};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::fs;
use tracing::debug;

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const LOWEST_FIRST: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Layered configuration store.
///
/// Holds raw values per layer. [`Config::logging`] produces the typed
/// [`LoggingConfig`] view.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Create a configuration holding only default values.
    pub fn new() -> Self {
        let mut layers = HashMap::new();
        layers.insert(
            ConfigLayer::Default,
            serde_json::json!({ "default_logger": DEFAULT_LOGGER_NAME, "sinks": [] }),
        );
        Self {
            layers,
            file_path: None,
        }
    }

    /// Create a new configuration from a file path.
    ///
    /// If the file doesn't exist, only defaults are present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::new();

        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| FanlogError::Config(format!("Failed to read config file: {}", e)))?;
            config = config.with_yaml(&content)?;
            debug!(path = %path.display(), "loaded logging configuration");
        }

        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Replace the loaded layer with the given YAML document.
    pub fn with_yaml(mut self, content: &str) -> Result<Self> {
        let value = load_yaml(content)
            .map_err(|e| FanlogError::Config(format!("Failed to parse config: {}", e)))?;

        // An empty document parses to null
        if !value.is_null() {
            if !value.is_object() {
                return Err(FanlogError::Config(
                    "Configuration root must be a mapping".to_string(),
                ));
            }
            self.layers.insert(ConfigLayer::Loaded, value);
        }
        Ok(self)
    }

    /// Apply `PREFIX_*` environment variables as the environment layer.
    ///
    /// `FANLOG_DEFAULT_LOGGER=app` sets `default_logger`; a double underscore
    /// separates nested keys. Variables that are not valid UTF-8 are skipped.
    pub fn with_env_overrides(self, prefix: &str) -> Self {
        let vars = std::env::vars_os().filter_map(|(key, value)| {
            match (key.to_str(), value.to_str()) {
                (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
                _ => {
                    debug!(key = %key.to_string_lossy(), "skipping environment variable that is not valid UTF-8");
                    None
                }
            }
        });
        self.with_env_vars(prefix, vars)
    }

    /// Apply overrides from an explicit list of variables.
    pub fn with_env_vars<I, K, V>(mut self, prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let wanted = format!("{}_", prefix);
        let mut layer = Value::Object(Default::default());

        for (key, raw) in vars {
            let Some(stripped) = key.as_ref().strip_prefix(&wanted) else {
                continue;
            };
            let path = stripped.to_lowercase().replace("__", ".");
            if path.is_empty() {
                continue;
            }
            // Scalars stay strings so `FANLOG_DEFAULT_LOGGER=404` is still a name
            let value = match load_yaml(raw.as_ref()) {
                Ok(parsed @ (Value::Object(_) | Value::Array(_))) => parsed,
                _ => Value::String(raw.as_ref().to_string()),
            };
            if let Err(e) = Self::set_value_at_path_impl(&mut layer, &path, value) {
                debug!(key = key.as_ref(), error = %e, "ignoring environment override");
            }
        }

        self.layers.insert(ConfigLayer::Environment, layer);
        self
    }

    /// Path the configuration was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get a configuration value by key, respecting layer priority.
    ///
    /// Returns None if the key doesn't exist in any layer.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        for layer in ConfigLayer::LOWEST_FIRST.iter().rev() {
            if let Some(layer_data) = self.layers.get(layer) {
                if let Some(value) = Self::get_value_at_path(layer_data, key) {
                    if let Some(typed_value) = Self::typed(value) {
                        return Some(typed_value);
                    }
                }
            }
        }

        None
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| FanlogError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        Self::set_value_at_path_impl(set_layer, key, value)
    }

    /// Merge all layers, lowest priority first.
    pub fn merged(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in &ConfigLayer::LOWEST_FIRST {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }

    /// Typed, validated logging configuration.
    pub fn logging(&self) -> Result<LoggingConfig> {
        let logging: LoggingConfig = serde_json::from_value(self.merged())
            .map_err(|e| FanlogError::Config(format!("Failed to parse logging config: {}", e)))?;
        logging.validate()?;
        Ok(logging)
    }

    // Helper: Deserialize a stored value, reading string scalars as YAML
    // when the requested type is not a string
    fn typed<T: for<'de> Deserialize<'de>>(value: &Value) -> Option<T> {
        if let Ok(typed_value) = serde_json::from_value(value.clone()) {
            return Some(typed_value);
        }
        match value {
            Value::String(raw) => load_yaml(raw)
                .ok()
                .and_then(|parsed| serde_json::from_value(parsed).ok()),
            _ => None,
        }
    }

    // Helper: Get value at dotted path
    fn get_value_at_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
        let mut current = data;

        for part in path.split('.') {
            current = current.get(part)?;
        }

        Some(current)
    }

    // Helper: Set value at dotted path
    fn set_value_at_path_impl(data: &mut Value, path: &str, value: Value) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();

        if parts.iter().any(|part| part.is_empty()) {
            return Err(FanlogError::Config(format!("Invalid key path '{}'", path)));
        }

        // Navigate to parent, creating intermediate objects as needed
        let mut current = data;
        for part in &parts[..parts.len() - 1] {
            if !current.is_object() {
                *current = Value::Object(Default::default());
            }
            let Value::Object(map) = current else {
                bug!("expected object after coercion at '{}'", part);
            };
            current = map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Default::default()));
        }

        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        if let (Value::Object(map), Some(last)) = (current, parts.last()) {
            map.insert(last.to_string(), value);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Load, apply `FANLOG_*` overrides, and validate a logging configuration.
pub fn load_logging_config(path: impl AsRef<Path>) -> Result<LoggingConfig> {
    Config::load(path)?.with_env_overrides("FANLOG").logging()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_types::{LogLevel, SinkConfig};
    use std::io::Write;

    #[test]
    fn test_config_layers() {
        let mut config = Config::new();

        // Override with loaded value
        config.layers.insert(
            ConfigLayer::Loaded,
            serde_json::json!({"default_logger": "loaded_value"}),
        );

        let value: String = config.get("default_logger").unwrap();
        assert_eq!(value, "loaded_value");

        config.set("default_logger", "set_value").unwrap();
        let value: String = config.get("default_logger").unwrap();
        assert_eq!(value, "set_value");

        let config = config.with_env_vars("FANLOG", [("FANLOG_DEFAULT_LOGGER", "env_value")]);
        let value: String = config.get("default_logger").unwrap();
        assert_eq!(value, "env_value");
    }

    #[test]
    fn test_load_file_and_typed_view() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_logger: app\nsinks:\n  - type: console\n    level: warning\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.file_path(), Some(file.path()));

        let logging = config.logging().unwrap();
        assert_eq!(logging.default_logger, "app");
        assert_eq!(logging.sinks.len(), 1);
        assert!(matches!(logging.sinks[0], SinkConfig::Console { level: LogLevel::Warning, .. }));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let logging = Config::load(dir.path().join("absent.yml"))
            .unwrap()
            .logging()
            .unwrap();
        assert_eq!(logging, LoggingConfig::default());
    }

    #[test]
    fn test_nested_env_override() {
        let config = Config::new()
            .with_env_vars(
                "FANLOG",
                [
                    ("FANLOG_EXTRA__RETRIES", "3"),
                    ("FANLOG_EXTRA__ENABLED", "true"),
                    ("OTHER_DEFAULT_LOGGER", "ignored"),
                ],
            );
        assert_eq!(config.get::<u32>("extra.retries"), Some(3));
        assert_eq!(config.get::<bool>("extra.enabled"), Some(true));
        assert_eq!(config.get::<String>("default_logger").as_deref(), Some("default"));
    }

    #[test]
    fn test_env_scalars_stay_names() {
        for raw in ["404", "true", "~", "1.5"] {
            let logging = Config::new()
                .with_env_vars("FANLOG", [("FANLOG_DEFAULT_LOGGER", raw)])
                .logging()
                .unwrap();
            assert_eq!(logging.default_logger, raw);
        }

        let config = Config::new().with_env_vars("FANLOG", [("FANLOG_EXTRA__TAGS", "[a, b]")]);
        assert_eq!(
            config.get::<Vec<String>>("extra.tags"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_env_overrides_skip_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = OsStr::from_bytes(b"\xff\xfe");
        std::env::set_var("FANLOG_CFGTEST__BAD", bad);
        std::env::set_var("CFGTEST_UNRELATED_BYTES", bad);
        std::env::set_var("FANLOG_CFGTEST__GOOD", "kept");

        let config = Config::new().with_env_overrides("FANLOG");

        std::env::remove_var("FANLOG_CFGTEST__BAD");
        std::env::remove_var("CFGTEST_UNRELATED_BYTES");
        std::env::remove_var("FANLOG_CFGTEST__GOOD");

        assert_eq!(config.get::<String>("cfgtest.good").as_deref(), Some("kept"));
        assert_eq!(config.get::<String>("cfgtest.bad"), None);
        assert!(config.logging().is_ok());
    }

    #[test]
    fn test_invalid_documents() {
        assert!(Config::new().with_yaml("- just\n- a list\n").is_err());
        assert!(Config::new().with_yaml("sinks: [").is_err());

        let config = Config::new()
            .with_yaml("sinks:\n  - type: http\n    url: not-a-url\n")
            .unwrap();
        let err = config.logging().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_set_rejects_empty_segments() {
        let mut config = Config::new();
        assert!(config.set("a..b", 1).is_err());
        config.set("a.b", 1).unwrap();
        assert_eq!(config.get::<i64>("a.b"), Some(1));
    }
}
