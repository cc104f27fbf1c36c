// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine settings and configuration.
//!
//! This module manages the tunables of the simulation:
//! - World gravity, terminal velocity and the kill floor
//! - Player speeds, heights and jump height
//! - Frame timing (delta clamp, FPS cap)
//! - Mouse look
//! - Demo scene options
//!
//! Settings are stored as RON.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "ashlar.ron";

/// Errors while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for [`Settings`]
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// The file was written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// A value parsed but is out of range
    #[error("Invalid value for {field}: {value}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// The rejected value as written
        value: String,
    },
}

/// World physics settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSettings {
    /// Vertical acceleration applied to shapes with gravity (negative is down)
    pub gravity: f32,
    /// Lowest vertical velocity a falling shape may reach
    pub terminal_velocity: f32,
    /// Shapes below this height are teleported to `respawn_point`
    pub kill_floor_y: f32,
    /// Where fallen shapes reappear
    pub respawn_point: Vec3,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: -19.6,
            terminal_velocity: -50.0,
            kill_floor_y: -30.0,
            respawn_point: Vec3::new(0.0, 10.0, 0.0),
        }
    }
}

/// Player controller settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    /// Horizontal speed when neither sprinting nor crouching
    pub walk_speed: f32,
    /// Horizontal speed while sprinting
    pub run_speed: f32,
    /// Horizontal speed while crouched
    pub crouch_speed: f32,
    /// Body height standing
    pub stand_height: f32,
    /// Body height crouched
    pub crouch_height: f32,
    /// Body width along X and Z
    pub width: f32,
    /// Apex height of a jump
    pub jump_height: f32,
    /// Player gravity, may differ from the world's
    pub gravity: f32,
    /// Lowest vertical velocity while falling
    pub terminal_velocity: f32,
    /// Eye height as a fraction of current body height, above the center
    pub eye_height_factor: f32,
    /// Spawn position (body center)
    pub spawn_point: Vec3,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            run_speed: 8.0,
            crouch_speed: 1.0,
            stand_height: 2.0,
            crouch_height: 1.0,
            width: 0.8,
            jump_height: 2.0,
            gravity: -19.6,
            terminal_velocity: -50.0,
            eye_height_factor: 0.4,
            spawn_point: Vec3::new(0.0, -1.4, 2.0),
        }
    }
}

/// Frame timing settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSettings {
    /// Upper bound for the simulation delta (seconds)
    pub max_delta: f32,
    /// Frame rate cap; `None` runs unbounded
    #[serde(default)]
    pub target_fps: Option<u32>,
    /// Seconds between FPS log lines
    pub fps_log_interval: f64,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            max_delta: 0.05,
            target_fps: None,
            fps_log_interval: 1.0,
        }
    }
}

/// Mouse look settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookSettings {
    /// Degrees per pixel of mouse motion
    pub sensitivity: f32,
    /// Initial yaw in degrees
    pub yaw: f32,
    /// Initial pitch in degrees
    pub pitch: f32,
    /// Pitch is clamped to plus/minus this many degrees
    pub pitch_limit: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            yaw: -90.0,
            pitch: 0.0,
            pitch_limit: 89.0,
        }
    }
}

/// Demo scene options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoSettings {
    /// Seed for entity AI randomness
    pub seed: u64,
    /// Spawn the friendly and enemy entities
    pub spawn_entities: bool,
    /// Add the water pond
    pub spawn_water: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            spawn_entities: true,
            spawn_water: true,
        }
    }
}

/// Complete settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Settings format version
    pub version: u32,
    /// World physics
    #[serde(default)]
    pub world: WorldSettings,
    /// Player controller
    #[serde(default)]
    pub player: PlayerSettings,
    /// Frame timing
    #[serde(default)]
    pub frame: FrameSettings,
    /// Mouse look
    #[serde(default)]
    pub look: LookSettings,
    /// Demo scene
    #[serde(default)]
    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            world: WorldSettings::default(),
            player: PlayerSettings::default(),
            frame: FrameSettings::default(),
            look: LookSettings::default(),
            demo: DemoSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a RON string
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = ron::from_str(content)?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the frame loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let frame = &self.frame;
        if !(frame.max_delta > 0.0 && frame.max_delta.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "frame.max_delta",
                value: frame.max_delta.to_string(),
            });
        }
        if Duration::try_from_secs_f64(frame.fps_log_interval).is_err() {
            return Err(ConfigError::Invalid {
                field: "frame.fps_log_interval",
                value: frame.fps_log_interval.to_string(),
            });
        }

        Ok(())
    }

    /// Serialize settings to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&content)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }
}
