//! ParticlePick Settings Crate
//!
//! Loads, validates and saves the picker configuration.

pub mod config;
pub mod error;

pub use config::{EventSettings, PickerConfig, PickingSettings, ViewSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
