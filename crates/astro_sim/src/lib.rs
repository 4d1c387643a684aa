//! # Astro Sim
//!
//! Simulation core for a 3D arcade asteroids game: a player-controlled ship
//! flies inside a bounded cubic arena with wrap-around faces, shoots
//! projectiles at asteroids that split on impact, and dies in a growing
//! blast before the field resets.
//!
//! The crate owns the deterministic per-frame update: adaptive timestep
//! normalization, quaternion orientation integration, collision detection,
//! pool-based spawn/despawn lifecycle, and the camera rig that turns raw
//! input into a view transform. Windowing, GPU state, and asset decoding
//! live in collaborators; the crate consumes an [`input::InputSnapshot`]
//! plus a wall-clock sample and produces a [`frame::FramePacket`] of
//! transform matrices and HUD scalars for a renderer to draw.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use astro_sim::prelude::*;
//!
//! let config = SimConfig::default();
//! let mut sim = Simulation::new(config, 0xA57E_401D);
//! let mut now_ms = 0;
//! loop {
//!     let input = InputSnapshot::default(); // from the input collaborator
//!     now_ms += 17;
//!     let packet = sim.step(&input, now_ms);
//!     // hand packet.draws and packet.hud to the renderer
//!     # let _ = packet;
//!     # break;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;

pub mod actor;
pub mod assets;
pub mod camera;
pub mod frame;
pub mod input;
pub mod sim;
pub mod transform;

mod config;
mod error;

pub use config::{ArenaConfig, CameraConfig, PoolConfig, ProjectionConfig, SimConfig, WeaponConfig};
pub use error::{AssetError, ConfigError};

/// Common imports for simulation users
pub mod prelude {
    pub use crate::{
        actor::{Actor, ActorPool, AsteroidTier},
        camera::CameraRig,
        foundation::{
            math::{inv_sqrt, Mat3, Quat, Vec3},
            time::FrameClock,
        },
        frame::{DrawCall, FramePacket, HudStats},
        input::{Controls, InputSnapshot},
        sim::Simulation,
        AssetError, ConfigError, SimConfig,
    };
}
