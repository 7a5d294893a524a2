//! This module handles the [`SceneConfig`], which is stored as RON on disk.

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;
use tinsel_formations::SceneMode;
use tinsel_particles::RGBArray;
use tracing::{debug, instrument, warn};

/// An error that can be returned when loading or saving a [`SceneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file couldn't be read or written.
    #[error("IO error on config file: {0}")]
    Io(#[from] io::Error),

    /// The file was readable but not valid config.
    #[error("Invalid config RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The config couldn't be turned into RON.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// How strongly the pointer tilts the whole scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Radians of rotation about Y per unit of pointer X.
    pub yaw_gain: f32,

    /// Radians of rotation about X per unit of pointer Y.
    pub pitch_gain: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            yaw_gain: 0.5,
            pitch_gain: 0.2,
        }
    }
}

/// Parameters for the bloom post-processing pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// The overall intensity of the bloom.
    pub strength: f32,

    /// How far the bloom spreads.
    pub radius: f32,

    /// The brightness above which things start to glow.
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            strength: 0.45,
            radius: 0.4,
            threshold: 0.7,
        }
    }
}

/// The colours used to draw the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Gold boxes, spheres, and photo frames, and the key spotlight.
    pub gold: RGBArray,

    /// Dust motes.
    pub cream: RGBArray,

    /// Green boxes.
    pub dark_green: RGBArray,

    /// Red spheres and candy cane stripes.
    pub red: RGBArray,

    /// The warm point light in the middle of the tree.
    pub orange: RGBArray,

    /// The cool rim spotlight.
    pub blue: RGBArray,

    /// The clear colour behind everything.
    pub background: RGBArray,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            gold: [0xd4, 0xaf, 0x37],
            cream: [0xfc, 0xee, 0xa7],
            dark_green: [0x01, 0x32, 0x20],
            red: [0x8b, 0x00, 0x00],
            orange: [0xff, 0xa5, 0x00],
            blue: [0x00, 0x00, 0xff],
            background: [0, 0, 0],
        }
    }
}

/// The perspective camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// The vertical field of view in degrees.
    pub fov_degrees: f32,

    /// The near clipping plane.
    pub near: f32,

    /// The far clipping plane.
    pub far: f32,

    /// Where the camera sits. It always looks at the origin.
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.,
            near: 0.1,
            far: 1000.,
            position: [0., 2., 50.],
        }
    }
}

/// Everything that can be tuned about a scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// How many boxes, spheres, and candy canes to create.
    pub main_count: usize,

    /// How many dust motes to create.
    pub dust_count: usize,

    /// The per-frame easing factor for the pointer.
    pub pointer_easing: f32,

    /// The per-frame easing factor for particle positions and scales.
    pub transform_easing: f32,

    /// See [`ParallaxConfig`].
    pub parallax: ParallaxConfig,

    /// How many ticks to run per second when the loop drives itself.
    pub frames_per_second: u32,

    /// See [`BloomConfig`].
    pub bloom: BloomConfig,

    /// See [`Palette`].
    pub palette: Palette,

    /// See [`CameraConfig`].
    pub camera: CameraConfig,

    /// The mode to start in.
    pub initial_mode: SceneMode,

    /// The furthest the pointer can move, in pixels, between press and release for it to still
    /// count as a click.
    pub click_drag_threshold: f32,

    /// Seed the particle RNG with this for a reproducible scene.
    pub rng_seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            main_count: 1500,
            dust_count: 2500,
            pointer_easing: 0.05,
            transform_easing: 0.04,
            parallax: ParallaxConfig::default(),
            frames_per_second: 60,
            bloom: BloomConfig::default(),
            palette: Palette::default(),
            camera: CameraConfig::default(),
            initial_mode: SceneMode::default(),
            click_drag_threshold: 5.,
            rng_seed: None,
        }
    }
}

impl SceneConfig {
    /// Try to load the config from the given file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Load the config from the given file, or use the default if the file is unavailable or
    /// invalid. Also save the default to the file for future editing.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match Self::load(path) {
            Ok(config) => {
                debug!("Loaded scene config");
                config
            }
            Err(error) => {
                warn!(%error, "Falling back to default scene config");

                let default = Self::default();
                if let Err(error) = default.save_to_file(path) {
                    warn!(%error, "Failed to write default scene config");
                }
                default
            }
        }
    }

    /// Serialize the config as pretty RON.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default().struct_names(true),
        )?)
    }

    /// Save the config to the given file, creating parent directories as needed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::DirBuilder::new().recursive(true).create(parent)?;
        }
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// A unique scratch file in the system temp directory.
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tinsel-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn ron_round_trip() {
        let config = SceneConfig {
            main_count: 12,
            initial_mode: SceneMode::Focus,
            rng_seed: Some(7),
            ..SceneConfig::default()
        };

        let text = config.to_ron().unwrap();
        assert!(text.starts_with("SceneConfig("));
        assert_eq!(ron::from_str::<SceneConfig>(&text).unwrap(), config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: SceneConfig = ron::from_str("(main_count: 3, bloom: (strength: 1.0))").unwrap();

        assert_eq!(config.main_count, 3);
        assert_eq!(config.dust_count, 2500);
        assert_eq!(config.bloom.strength, 1.);
        assert_eq!(config.bloom.threshold, 0.7);
    }

    #[test]
    fn garbage_falls_back_and_writes_default() {
        let path = temp_path("garbage.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is not ron {{{").unwrap();

        assert!(SceneConfig::load(&path).is_err());
        assert_eq!(SceneConfig::from_file(&path), SceneConfig::default());

        // The default should have been written back
        assert_eq!(SceneConfig::load(&path).unwrap(), SceneConfig::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn mode_cycle_is_not_configurable() {
        let text = SceneConfig::default().to_ron().unwrap();
        assert!(!text.contains("mode_cycle"));
    }
}
