#![forbid(unsafe_code)]

//! Tunables for drag resolution and session behaviour.
//!
//! ```toml
//! # cardflow.toml
//! probe_width = 24.0
//! probe_height = 24.0
//! track_capacity = true
//! keyboard_crosses_containers = false
//! ```
//!
//! ```rust,ignore
//! let config = DragConfig::from_toml_file("cardflow.toml")?.validated()?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collision::CollisionResolver;

/// Default probe edge in pixels.
pub const DEFAULT_PROBE_SIZE: f64 = 16.0;

/// Drag engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Width of the probe rectangle centred on the pointer.
    pub probe_width: f64,
    /// Height of the probe rectangle centred on the pointer.
    pub probe_height: f64,
    /// Recompute capacity status after every board change.
    pub track_capacity: bool,
    /// Left/Right keyboard intents move items between adjacent containers.
    pub keyboard_crosses_containers: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            probe_width: DEFAULT_PROBE_SIZE,
            probe_height: DEFAULT_PROBE_SIZE,
            track_capacity: true,
            keyboard_crosses_containers: true,
        }
    }
}

impl DragConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, DragConfigError> {
        toml::from_str(s).map_err(DragConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, DragConfigError> {
        serde_json::from_str(s).map_err(DragConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("probe_width", self.probe_width),
            ("probe_height", self.probe_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be finite and > 0, got {value}"));
            }
        }
        errors
    }

    /// Return `self` if it validates, otherwise the collected errors.
    pub fn validated(self) -> Result<Self, DragConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DragConfigError::Validation(errors))
        }
    }

    /// Resolver using this config's probe size.
    #[must_use]
    pub fn resolver(&self) -> CollisionResolver {
        CollisionResolver::new(self.probe_width, self.probe_height)
    }
}

/// Errors that can occur when loading a drag configuration.
#[derive(Debug)]
pub enum DragConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DragConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(DragConfig::default().validate().is_empty());
    }

    #[test]
    fn rejects_degenerate_probe() {
        let config = DragConfig {
            probe_width: 0.0,
            probe_height: f64::NAN,
            ..DragConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("probe_width"));

        let err = config.validated().unwrap_err();
        assert!(err.to_string().starts_with("validation errors: probe_width"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_fills_defaults() {
        let config = DragConfig::from_toml_str("probe_width = 30.0\n").unwrap();
        assert_eq!(config.probe_width, 30.0);
        assert_eq!(config.probe_height, DEFAULT_PROBE_SIZE);
        assert!(config.track_capacity);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_roundtrip() {
        let config = DragConfig {
            keyboard_crosses_containers: false,
            ..DragConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DragConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_toml_is_reported() {
        let err = DragConfig::from_toml_str("probe_width = \"wide\"").unwrap_err();
        assert!(matches!(err, DragConfigError::Toml(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = DragConfig::from_json_file("/nonexistent/cardflow.json").unwrap_err();
        assert!(matches!(err, DragConfigError::Io(_)));
    }
}
