//! Tunable spinner settings.
//!
//! Every threshold the engine uses lives here with its literal default.
//! Configs are plain JSON; missing fields fall back to the defaults, so a
//! file containing only `{"design": "ninja"}` is valid.

use crate::design::SpinnerDesign;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default simulation tick, roughly 60 Hz.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;
/// Below this speed (degrees per tick) a coasting spinner is settled.
pub const DEFAULT_STOP_THRESHOLD: f64 = 0.1;
/// Minimum gap between two drag haptic pulses.
pub const DEFAULT_HAPTIC_INTERVAL_MS: u64 = 100;
/// Drag speeds at or below this are noise and produce no pulse.
pub const DEFAULT_HAPTIC_MIN_INTENSITY: f64 = 5.0;
/// Ticks run at most this many times per wake-up after a stall.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 8;

/// Spinner configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Design selected at start-up.
    pub design: SpinnerDesign,
    pub tick_interval_ms: u64,
    pub max_catch_up_ticks: u32,
    pub stop_threshold: f64,
    pub haptic_interval_ms: u64,
    pub haptic_min_intensity: f64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            design: SpinnerDesign::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            haptic_interval_ms: DEFAULT_HAPTIC_INTERVAL_MS,
            haptic_min_intensity: DEFAULT_HAPTIC_MIN_INTENSITY,
        }
    }
}

impl SpinnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_design(mut self, design: SpinnerDesign) -> Self {
        self.design = design;
        self
    }

    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    pub fn with_max_catch_up_ticks(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks;
        self
    }

    pub fn with_stop_threshold(mut self, threshold: f64) -> Self {
        self.stop_threshold = threshold;
        self
    }

    pub fn with_haptic_interval_ms(mut self, ms: u64) -> Self {
        self.haptic_interval_ms = ms;
        self
    }

    pub fn with_haptic_min_intensity(mut self, intensity: f64) -> Self {
        self.haptic_min_intensity = intensity;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigError::Invalid("max_catch_up_ticks must be positive".into()));
        }
        if !self.stop_threshold.is_finite() || self.stop_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stop_threshold must be a non-negative number, got {}",
                self.stop_threshold
            )));
        }
        if !self.haptic_min_intensity.is_finite() || self.haptic_min_intensity < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "haptic_min_intensity must be a non-negative number, got {}",
                self.haptic_min_intensity
            )));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SpinnerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded spinner config from {}", path.display());
        Ok(config)
    }

    /// Save this config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
