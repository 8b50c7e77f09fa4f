//! Controller tuning, loadable from a RON file.
//!
//! ```ron
//! (
//!     sensitivity: 0.002,
//!     speed: 0.08,
//!     spawn: (0.0, 1.6, 5.0),
//! )
//! ```
//!
//! Omitted fields keep their defaults.

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::input::KeyBindings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Radians of rotation per pixel of pointer movement.
    pub sensitivity: f32,
    /// Distance walked per unit of tick step.
    pub speed: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
    /// Display rate at which one animation frame equals one tick step.
    pub reference_hz: f32,
    /// Longest frame the clock integrates; stalls beyond this are dropped.
    pub max_frame_secs: f32,
    pub spawn: (f32, f32, f32),
    pub bindings: KeyBindings,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            speed: 0.1,
            pitch_limit: FRAC_PI_2,
            reference_hz: 60.0,
            max_frame_secs: 0.1,
            spawn: (0.0, 1.7, 15.0),
            bindings: KeyBindings::default(),
        }
    }
}

impl ControllerConfig {
    pub fn spawn_position(&self) -> Vec3 {
        Vec3::new(self.spawn.0, self.spawn.1, self.spawn.2)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded controller config");
        Ok(config)
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid { field, reason: reason.into() }
        }

        if !self.sensitivity.is_finite() || self.sensitivity < 0.0 {
            return Err(invalid("sensitivity", format!("must be finite and >= 0, got {}", self.sensitivity)));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(invalid("speed", format!("must be finite and >= 0, got {}", self.speed)));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit <= FRAC_PI_2) {
            return Err(invalid("pitch_limit", format!("must be in (0, pi/2], got {}", self.pitch_limit)));
        }
        if !(self.reference_hz.is_finite() && self.reference_hz > 0.0) {
            return Err(invalid("reference_hz", format!("must be > 0, got {}", self.reference_hz)));
        }
        if !(self.max_frame_secs.is_finite() && self.max_frame_secs > 0.0) {
            return Err(invalid("max_frame_secs", format!("must be > 0, got {}", self.max_frame_secs)));
        }
        if !self.spawn_position().is_finite() {
            return Err(invalid("spawn", "must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let cfg = ControllerConfig::from_ron_str("(speed: 0.08, spawn: (0.0, 1.6, 5.0))").unwrap();
        assert_eq!(cfg.speed, 0.08);
        assert_eq!(cfg.spawn_position(), Vec3::new(0.0, 1.6, 5.0));
        assert_eq!(cfg.sensitivity, 0.002);
        assert_eq!(cfg.bindings, KeyBindings::default());
    }

    #[test]
    fn test_round_trip_through_ron() {
        let mut cfg = ControllerConfig::default();
        cfg.bindings.toggle_light = "l".to_string();
        let text = cfg.to_ron_string().unwrap();
        assert_eq!(ControllerConfig::from_ron_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_rejects_pitch_limit_past_vertical() {
        let err = ControllerConfig::from_ron_str("(pitch_limit: 2.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pitch_limit", .. }));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let cfg = ControllerConfig { speed: -1.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "speed", .. })));
    }

    #[test]
    fn test_rejects_malformed_ron() {
        let err = ControllerConfig::from_ron_str("(speed: )").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(sensitivity: 0.004)").unwrap();
        let cfg = ControllerConfig::load(file.path()).unwrap();
        assert_eq!(cfg.sensitivity, 0.004);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControllerConfig::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
