//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera projection and sensitivities, display
//! colors and sizes) are consolidated here. Options serialize to/from TOML
//! so a host can persist view presets.

mod camera;
mod display;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
use serde::{Deserialize, Serialize};

use crate::error::CubeviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Scene colors and overlay sizes.
    pub display: DisplayOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::Io`] if the file cannot be read, or
    /// [`CubeviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, CubeviewError> {
        let content = std::fs::read_to_string(path).map_err(CubeviewError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CubeviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::OptionsParse`] if serialization fails, or
    /// [`CubeviewError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), CubeviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CubeviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CubeviewError::Io)?;
        }
        std::fs::write(path, content).map_err(CubeviewError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
fovy = 60.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 60.0);
        // Everything else should be default
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.initial_zoom, -8.0);
        assert_eq!(opts.display.axis_length, 10.0);
    }

    #[test]
    fn default_camera_matches_fixed_projection() {
        let opts = Options::default();
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.zfar, 100.0);
    }
}
