//! Scan settings
//!
//! Persisted as JSON. Missing fields fall back to their defaults so older
//! files keep loading.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::{SkyError, SkyResult};
use crate::sky::events::GeneratorConfig;
use crate::sky::rotation::RotationConfig;

/// Sector layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Hexagon center-to-vertex radius (viewport units)
    pub hex_radius: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            hex_radius: HEX_RADIUS,
            viewport_width: VIEWPORT_SIZE,
            viewport_height: VIEWPORT_SIZE,
        }
    }
}

/// Aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Ticks between debug signal summaries (0 = never)
    pub summary_interval: u64,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            summary_interval: 600, // ~10 seconds at 60 Hz
        }
    }
}

/// All scan settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rotation: RotationConfig,
    pub grid: GridSettings,
    pub aggregation: AggregationSettings,
    /// Demo event field
    pub generator: GeneratorConfig,
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> SkyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SkyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file, falling back to defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(SkyError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> SkyResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.grid.hex_radius, 80.0);
        assert_eq!(s.grid.viewport_width, 800.0);
        assert_eq!(s.rotation.rotation_speed, ROTATION_SPEED);
        assert!(s.rotation.smooth);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "rotation": { "smooth": false }, "grid": { "hex_radius": 60.0 } }"#)
            .unwrap();
        assert!(!s.rotation.smooth);
        assert_eq!(s.rotation.damping, ROTATION_DAMPING);
        assert_eq!(s.grid.hex_radius, 60.0);
        assert_eq!(s.grid.viewport_height, VIEWPORT_SIZE);
        assert_eq!(s.generator.seed, 42);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = Settings::default();
        s.generator.seed = 7;
        s.aggregation.summary_interval = 0;
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back.generator.seed, 7);
        assert_eq!(back.aggregation.summary_interval, 0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load("/nonexistent/skyscan-settings.json");
        assert_eq!(s.grid.hex_radius, HEX_RADIUS);
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let path = std::env::temp_dir().join(format!("skyscan-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ \"grid\": { \"hex_radius\": ").unwrap();
        let s = Settings::load(&path);
        assert_eq!(s.grid.hex_radius, HEX_RADIUS);
        assert!(s.rotation.smooth);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("skyscan-settings-{}.json", std::process::id()));
        let mut s = Settings::default();
        s.grid.viewport_width = 1024.0;
        s.save(&path).unwrap();
        let loaded = Settings::load(&path);
        assert_eq!(loaded.grid.viewport_width, 1024.0);
        let _ = std::fs::remove_file(&path);
    }
}
