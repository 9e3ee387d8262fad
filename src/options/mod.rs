//! Runtime configuration with TOML persistence and command-line overrides.
//!
//! All tweakable settings (window setup, camera tunables) are consolidated
//! here. Options serialize to/from TOML; every sub-struct uses
//! `#[serde(default)]` so a partial file (e.g. only overriding `[camera]`)
//! works correctly. Command-line flags parsed by [`cli`] are applied on top
//! of whatever the file provided.

mod camera;
mod cli;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use cli::{usage, CliOverrides};
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::GloamError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Window and swapchain setup.
    pub window: WindowOptions,
    /// Camera tunables applied at startup.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GloamError::Io`] if the file cannot be read and
    /// [`GloamError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GloamError> {
        let content = std::fs::read_to_string(path).map_err(GloamError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GloamError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GloamError::OptionsParse`] if serialization fails and
    /// [`GloamError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GloamError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GloamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GloamError::Io)?;
        }
        std::fs::write(path, content).map_err(GloamError::Io)
    }

    /// Load options from `path` if it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`Options::load`] errors for a file that exists but does
    /// not parse; a missing file is not an error.
    pub fn load_or_default(path: &Path) -> Result<Self, GloamError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
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
movement_speed = 5.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.movement_speed, 5.0);
        // Everything else should be default
        assert_eq!(opts.camera.mouse_sensitivity, 0.1);
        assert_eq!(opts.window.width, 800);
        assert!(opts.window.vsync);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let opts: Options = toml::from_str("").unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut opts = Options::default();
        opts.window.msaa = 1;
        opts.camera.fovy = 70.0;
        let path =
            std::env::temp_dir().join("gloam-options-test").join("gloam.toml");
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(opts, loaded);
    }

    #[test]
    fn load_or_default_tolerates_a_missing_file() {
        let path = std::env::temp_dir().join("gloam-definitely-missing.toml");
        let opts = Options::load_or_default(&path).unwrap();
        assert_eq!(opts, Options::default());
    }
}
