//! Configuration for the picking viewer
//!
//! Supports JSON and TOML files, picked by extension. Sections:
//! - View defaults (initial magnification)
//! - Picking behaviour (keyboard nudge step, centre cross size)
//! - Initially visible annotation shapes
//! - Event bus history

use particlepick_core::{EventBusConfig, ShapeSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const CONFIG_DIR_NAME: &str = "particlepick";
const CONFIG_FILE_NAME: &str = "config.toml";

/// View defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Magnification a freshly opened view starts at
    pub initial_magnification: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            initial_magnification: 1.0,
        }
    }
}

/// Picking behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    /// Image pixels moved per arrow key press
    pub nudge_step: i32,
    /// Half-length of the centre cross, in image pixels
    pub center_cross_length: f64,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            nudge_step: 1,
            center_cross_length: 10.0,
        }
    }
}

/// Event bus history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    pub enable_history: bool,
    pub max_history_size: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            enable_history: false,
            max_history_size: 1000,
        }
    }
}

/// Complete picker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PickerConfig {
    pub view: ViewSettings,
    pub picking: PickingSettings,
    /// Shapes shown when a session starts
    pub shapes: ShapeSet,
    pub events: EventSettings,
}

impl PickerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/particlepick/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded picker config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or return defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!(
                "No config at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML), creating the parent directory
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mag = self.view.initial_magnification;
        if !mag.is_finite() || mag <= 0.0 {
            return Err(ConfigError::out_of_range("view.initial_magnification", mag));
        }

        if self.picking.nudge_step <= 0 {
            return Err(ConfigError::out_of_range(
                "picking.nudge_step",
                self.picking.nudge_step,
            ));
        }

        let cross = self.picking.center_cross_length;
        if !cross.is_finite() || cross <= 0.0 {
            return Err(ConfigError::out_of_range("picking.center_cross_length", cross));
        }

        if self.events.max_history_size == 0 {
            return Err(ConfigError::out_of_range("events.max_history_size", 0));
        }

        Ok(())
    }

    /// Event bus configuration derived from the `events` section
    pub fn event_bus_config(&self) -> EventBusConfig {
        EventBusConfig {
            enable_history: self.events.enable_history,
            max_history_size: self.events.max_history_size,
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
