//! Simulation configuration
//!
//! Defaults reproduce the tuned gameplay constants; a TOML file can
//! override any section.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena bounds and field population
    pub arena: ArenaConfig,

    /// Actor pool capacities
    pub pools: PoolConfig,

    /// Projectile tuning
    pub weapons: WeaponConfig,

    /// Camera rig modifiers
    pub camera: CameraConfig,

    /// Projection frustum parameters
    pub projection: ProjectionConfig,
}

/// Arena bounds and asteroid field settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Distance from center to each face of the cubic arena
    pub size: f32,

    /// Milliseconds between periodic asteroid spawns
    pub spawn_interval_ms: u64,
}

/// Fixed actor pool capacities; no allocation happens during play
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum live projectiles
    pub max_shots: usize,

    /// Maximum live asteroids
    pub max_asteroids: usize,

    /// Asteroids spawned at startup and after each reset
    pub initial_asteroids: usize,
}

/// Projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Shot speed along the aim direction, per frame-unit
    pub shot_speed: f32,

    /// Minimum milliseconds between shots while fire is held
    pub cooldown_ms: u64,

    /// Shots despawn past this distance from the player
    pub range: f32,
}

/// Camera rig modifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Scales mouse deltas into rotation rate
    pub rotation_modifier: f32,

    /// Roll key rate multiplier
    pub roll_modifier: f32,

    /// Thrust acceleration multiplier
    pub velocity_modifier: f32,

    /// Mouse sensitivity
    pub sensitivity: f32,

    /// Neutral camera z offset behind the player model
    pub z_offset: f32,
}

/// Projection frustum parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees, before the rig's multiplier
    pub fov_deg: f32,

    /// Near clip plane distance
    pub near_clip: f32,

    /// Far clip plane distance
    pub far_clip: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            pools: PoolConfig::default(),
            weapons: WeaponConfig::default(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            size: 500.0,
            spawn_interval_ms: 30_000,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_shots: 8,
            max_asteroids: 64,
            initial_asteroids: 32,
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            shot_speed: 5.0,
            cooldown_ms: 250,
            range: 320.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotation_modifier: 0.005,
            roll_modifier: 7.0,
            velocity_modifier: 0.008,
            sensitivity: 0.8,
            z_offset: -5.0,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_deg: 80.0,
            near_clip: 1.0,
            far_clip: 800.0,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist
    ///
    /// A present-but-malformed file is an error: silently playing with
    /// defaults after a typo would be worse than failing at startup.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = toml::from_str(&text)
                    .map_err(|source| ConfigError::Parse {
                        path: path.display().to_string(),
                        source,
                    })?;
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "No configuration at {}; using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
