//! On-disk player settings

use cinder_core::Result;
use serde::Deserialize;
use std::path::Path;

/// Player settings loaded from a TOML file. Every field is optional in
/// the file; CLI flags override whatever was loaded. Out-of-range loop
/// values are clamped later by the loop configuration, not rejected
/// here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Simulation updates per second.
    pub updates_per_second: u32,
    /// Render opportunities per update interval (1-4).
    pub subdivision_count: u32,
    /// Maximum catch-up updates per dispatch pass.
    pub max_frame_skip: u32,
    /// Particles kept alive by the fountain.
    pub particle_count: usize,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 60,
            subdivision_count: 1,
            max_frame_skip: 5,
            particle_count: 750,
            window_width: 800,
            window_height: 600,
        }
    }
}

impl PlayerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.updates_per_second, 60);
        assert_eq!(config.subdivision_count, 1);
        assert_eq!(config.max_frame_skip, 5);
        assert_eq!(config.particle_count, 750);
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: PlayerConfig =
            toml::from_str("updates_per_second = 30\nsubdivision_count = 4").unwrap();
        assert_eq!(config.updates_per_second, 30);
        assert_eq!(config.subdivision_count, 4);
        assert_eq!(config.particle_count, 750);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(PlayerConfig::load(Path::new("/nonexistent/cinder.toml")).is_err());
    }
}
