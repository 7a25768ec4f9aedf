//! Harness settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{SimulationClock, SpawnConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Simulation ===
    /// Fixed physics tick in seconds
    pub fixed_step: f64,
    /// Cap on accumulated real time in seconds
    pub max_accumulated: f64,
    /// Gravity handed to the stand-in engine (pixels/s²)
    pub gravity: Vec2,
    /// RNG seed; random when absent
    pub seed: Option<u64>,

    // === Debug overlay ===
    pub contact_normal_length: f32,
    pub contact_point_size: f32,

    // === Spawning ===
    pub spawn: SpawnConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            fixed_step: SIM_DT,
            max_accumulated: MAX_ACCUMULATED,
            gravity: GRAVITY,
            seed: None,

            contact_normal_length: CONTACT_NORMAL_LENGTH,
            contact_point_size: CONTACT_POINT_SIZE,

            spawn: SpawnConfig::default(),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(Error::invalid(format!(
                "window must have a positive size, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        SimulationClock::new(self.fixed_step, self.max_accumulated)?;
        if !self.gravity.is_finite() {
            return Err(Error::invalid("gravity must be finite"));
        }
        if !(self.contact_point_size > 0.0) {
            return Err(Error::invalid("contact_point_size must be positive"));
        }
        self.spawn.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.window_width, 800.0);
        assert_eq!(s.fixed_step, 1.0 / 60.0);
        assert_eq!(s.spawn.circle_radius, [20.0, 80.0]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"seed": 42, "spawn": {"circle_radius": [5.0, 10.0]}}"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.spawn.circle_radius, [5.0, 10.0]);
        assert_eq!(s.spawn.half_extent, [50.0, 100.0]);
        assert_eq!(s.window_height, 600.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let s = Settings {
            fixed_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(Error::InvalidParameter(_))));

        let s = Settings {
            max_accumulated: 0.001,
            ..Default::default()
        };
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.spawn.polygon_base_vertices = 1;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_tick_rate() {
        let s: Settings = serde_json::from_str(r#"{"fixed_step": 1e-10, "max_accumulated": 1.0}"#).unwrap();
        assert!(matches!(s.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/pe2d-settings.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join(format!("pe2d-settings-{}.json", std::process::id()));
        let mut s = Settings::default();
        s.seed = Some(7);
        std::fs::write(&path, serde_json::to_string(&s).unwrap()).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, s);
    }
}
