//! Layered tree configuration.
//!
//! Values flow Default < File < Environment < Cli; each value remembers
//! where it came from so callers can tell a deliberate extent from the
//! built-in one.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{QuadmapError, Result};
use crate::geom::Boundary;
use crate::transform::ScaleProjection;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for building a tree: node capacity, world extent,
/// and the degrees-per-unit export scale.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub capacity: ConfigValue<usize>,
    pub center_x: ConfigValue<f64>,
    pub center_y: ConfigValue<f64>,
    pub half_width: ConfigValue<f64>,
    pub half_height: ConfigValue<f64>,
    pub latlng_scale: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values: capacity 4 and a
    /// whole-world extent in degrees.
    pub fn with_defaults() -> Self {
        Self {
            capacity: ConfigValue::new(4, ConfigSource::Default),
            center_x: ConfigValue::new(0.0, ConfigSource::Default),
            center_y: ConfigValue::new(0.0, ConfigSource::Default),
            half_width: ConfigValue::new(180.0, ConfigSource::Default),
            half_height: ConfigValue::new(90.0, ConfigSource::Default),
            latlng_scale: ConfigValue::new(1.0, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| QuadmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {e}"),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| QuadmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {e}"),
            })?;

        if let Some(capacity) = file_config.capacity {
            self.capacity.update(capacity, ConfigSource::File);
        }
        if let Some(center_x) = file_config.center_x {
            self.center_x.update(center_x, ConfigSource::File);
        }
        if let Some(center_y) = file_config.center_y {
            self.center_y.update(center_y, ConfigSource::File);
        }
        if let Some(half_width) = file_config.half_width {
            self.half_width.update(half_width, ConfigSource::File);
        }
        if let Some(half_height) = file_config.half_height {
            self.half_height.update(half_height, ConfigSource::File);
        }
        if let Some(latlng_scale) = file_config.latlng_scale {
            self.latlng_scale.update(latlng_scale, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from `QUADMAP_*` environment variables. Invalid
    /// values are warned about and skipped.
    pub fn load_from_env(mut self) -> Self {
        if let Some(capacity) = env_usize("QUADMAP_CAPACITY") {
            self.capacity.update(capacity, ConfigSource::Environment);
        }
        if let Some(center_x) = env_f64("QUADMAP_CENTER_X") {
            self.center_x.update(center_x, ConfigSource::Environment);
        }
        if let Some(center_y) = env_f64("QUADMAP_CENTER_Y") {
            self.center_y.update(center_y, ConfigSource::Environment);
        }
        if let Some(half_width) = env_f64("QUADMAP_HALF_WIDTH") {
            self.half_width.update(half_width, ConfigSource::Environment);
        }
        if let Some(half_height) = env_f64("QUADMAP_HALF_HEIGHT") {
            self.half_height.update(half_height, ConfigSource::Environment);
        }
        if let Some(latlng_scale) = env_f64("QUADMAP_LATLNG_SCALE") {
            self.latlng_scale.update(latlng_scale, ConfigSource::Environment);
        }
        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(capacity) = overrides.capacity {
            self.capacity.update(capacity, ConfigSource::Cli);
        }
        if let Some(center_x) = overrides.center_x {
            self.center_x.update(center_x, ConfigSource::Cli);
        }
        if let Some(center_y) = overrides.center_y {
            self.center_y.update(center_y, ConfigSource::Cli);
        }
        if let Some(half_width) = overrides.half_width {
            self.half_width.update(half_width, ConfigSource::Cli);
        }
        if let Some(half_height) = overrides.half_height {
            self.half_height.update(half_height, ConfigSource::Cli);
        }
        if let Some(latlng_scale) = overrides.latlng_scale {
            self.latlng_scale.update(latlng_scale, ConfigSource::Cli);
        }
    }

    /// Whether any extent value was set explicitly (file, environment, or
    /// CLI). When everything is still a default, callers are free to fit the
    /// extent to their data instead.
    pub fn extent_overridden(&self) -> bool {
        [
            self.center_x.source,
            self.center_y.source,
            self.half_width.source,
            self.half_height.source,
        ]
        .iter()
        .any(|source| *source != ConfigSource::Default)
    }

    /// The configured world boundary
    pub fn boundary(&self) -> Result<Boundary> {
        Boundary::new(
            self.center_x.value,
            self.center_y.value,
            self.half_width.value,
            self.half_height.value,
        )
    }

    /// The configured export projection
    pub fn projection(&self) -> Result<ScaleProjection> {
        ScaleProjection::new(self.latlng_scale.value)
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from a TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    capacity: Option<usize>,
    center_x: Option<f64>,
    center_y: Option<f64>,
    half_width: Option<f64>,
    half_height: Option<f64>,
    latlng_scale: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub capacity: Option<usize>,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub half_width: Option<f64>,
    pub half_height: Option<f64>,
    pub latlng_scale: Option<f64>,
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected a number", key, raw);
            None
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = env::var(key).ok()?;
    match raw.parse::<usize>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected a non-negative integer", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.capacity.value, 4);
        assert_eq!(config.capacity.source, ConfigSource::Default);
        assert_eq!(config.half_width.value, 180.0);
        assert_eq!(config.half_height.value, 90.0);
        assert!(!config.extent_overridden());
        assert!(config.boundary().is_ok());
        assert!(config.projection().is_ok());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);

        // Lower precedence must not override.
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
capacity = 8
center_x = 500.0
center_y = -500.0
half_width = 1000.0
half_height = 750.0
latlng_scale = 0.01
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.capacity.value, 8);
        assert_eq!(config.capacity.source, ConfigSource::File);
        assert_eq!(config.center_x.value, 500.0);
        assert_eq!(config.half_height.value, 750.0);
        assert_eq!(config.latlng_scale.value, 0.01);
        assert!(config.extent_overridden());

        let boundary = config.boundary().unwrap();
        assert_eq!(boundary.min_x(), -500.0);
        assert_eq!(boundary.max_x(), 1500.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "capacity = 16").unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
        assert_eq!(config.capacity.value, 16);
        assert_eq!(config.half_width.value, 180.0);
        assert!(!config.extent_overridden());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "capacity = \"lots\"").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(QuadmapError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            capacity: Some(2),
            half_width: Some(50.0),
            half_height: Some(50.0),
            ..Default::default()
        };
        config.update_from_cli(overrides);

        assert_eq!(config.capacity.value, 2);
        assert_eq!(config.capacity.source, ConfigSource::Cli);
        assert_eq!(config.half_width.value, 50.0);
        assert!(config.extent_overridden());
        // Untouched values stay defaults.
        assert_eq!(config.center_x.source, ConfigSource::Default);
        assert_eq!(config.latlng_scale.source, ConfigSource::Default);
    }
}
