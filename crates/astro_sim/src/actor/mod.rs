//! Actor model: pose, velocity, spin, and lifecycle state
//!
//! Every simulated body (player, shot, asteroid, blast effect) is an
//! [`Actor`]. Shots and asteroids live in fixed-size [`ActorPool`]s;
//! spawning claims a free slot, despawning clears the flag, and no
//! allocation happens during play.

mod pool;
mod tier;

pub use pool::ActorPool;
pub use tier::AsteroidTier;

use crate::foundation::math::{Quat, Vec3};

/// Instantaneous Euler rotation rate in radians per frame-unit
///
/// For the player this is an input signal: the camera rig sets it from
/// mouse/roll input and zeroes it after the rotation step consumes it.
/// Asteroids, shots, and the blast set it once at spawn and keep it,
/// giving perpetual tumbling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngularRate {
    /// Rotation about the local Y axis
    pub yaw: f32,

    /// Rotation about the local X axis
    pub pitch: f32,

    /// Rotation about the local Z axis
    pub roll: f32,
}

impl AngularRate {
    /// Zero all three components
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A simulated body
///
/// `position` follows the camera-relative convention for player-tracked
/// actors: the stored player position is the *negative* of the player's
/// true world position, because the renderer moves the world rather than
/// the camera. See [`crate::sim::world_space_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Whether this actor participates in simulation and rendering.
    /// A despawned actor is inert; its slot may be reused.
    pub spawned: bool,

    /// Size/scale category: asteroid tier mass, blast growth scalar.
    /// Unused for shots.
    pub mass: f32,

    /// World-space location, bounded to the arena cube per axis
    pub position: Vec3,

    /// Per-frame position delta
    pub velocity: Vec3,

    /// Unit orientation quaternion, renormalized lazily by the transform
    /// engine when drift exceeds tolerance
    pub orientation: Quat,

    /// Euler rate applied by the rotation step each frame
    pub angular_rate: AngularRate,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            spawned: false,
            mass: 0.0,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            orientation: Quat::identity(),
            angular_rate: AngularRate::default(),
        }
    }
}

impl Actor {
    /// Create a spawned actor with identity pose
    #[must_use]
    pub fn spawned_at_origin(mass: f32) -> Self {
        Self {
            spawned: true,
            mass,
            ..Self::default()
        }
    }

    /// Reset to a spawned identity pose, clearing velocity and spin
    pub fn respawn_at_origin(&mut self) {
        *self = Self::spawned_at_origin(1.0);
    }

    /// Mark the actor inert; the slot becomes reusable
    pub fn despawn(&mut self) {
        self.spawned = false;
    }
}
