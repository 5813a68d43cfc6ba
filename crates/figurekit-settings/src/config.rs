//! Editor configuration
//!
//! Settings are grouped into sections:
//! - History (undo depth, edit coalescing)
//! - Hit testing (pick tolerance)
//! - Geometry (curve sampling, numeric epsilon)
//!
//! Files may be JSON or TOML; the format is picked from the extension.
//! Sections missing from a file take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const CONFIG_DIR_NAME: &str = "figurekit";
const CONFIG_FILE_NAME: &str = "settings.toml";

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of edits kept in the log
    pub undo_limit: usize,
    /// Merge consecutive compatible edits into one undo step
    pub coalesce_edits: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            undo_limit: 100,
            coalesce_edits: true,
        }
    }
}

/// Hit testing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestSettings {
    /// Pick tolerance in drawing units
    pub tolerance: f64,
}

impl Default for HitTestSettings {
    fn default() -> Self {
        Self { tolerance: 2.0 }
    }
}

/// Geometry evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Samples per curve segment when measuring distances
    pub curve_samples: usize,
    /// Coordinates closer than this are considered equal
    pub epsilon: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            curve_samples: 32,
            epsilon: 1e-9,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorSettings {
    pub history: HistorySettings,
    pub hit_testing: HitTestSettings,
    pub geometry: GeometrySettings,
}

impl EditorSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/figurekit/settings.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::debug!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(
                "No settings file at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history.undo_limit == 0 {
            return Err(invalid("history.undo_limit", "must be > 0"));
        }

        if !self.hit_testing.tolerance.is_finite() || self.hit_testing.tolerance < 0.0 {
            return Err(invalid("hit_testing.tolerance", "must be finite and >= 0"));
        }

        if self.geometry.curve_samples < 2 {
            return Err(ConfigError::ValueOutOfRange {
                key: "geometry.curve_samples".to_string(),
                value: self.geometry.curve_samples.to_string(),
            }
            .into());
        }

        if !self.geometry.epsilon.is_finite() || self.geometry.epsilon <= 0.0 {
            return Err(invalid("geometry.epsilon", "must be finite and > 0"));
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
