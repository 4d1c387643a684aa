//! Orientation and transform engine
//!
//! Converts per-frame Euler rotation rates into quaternion updates,
//! integrates positions with toroidal arena wrap, and composes the
//! per-actor 4x4 transform handed to the renderer.
//!
//! Internal math uses standard (non-transposed) rotation matrices; the
//! fixed-function graphics layout lives solely in [`layout`], applied once
//! at the composition boundary.

pub mod layout;

use crate::actor::Actor;
use crate::foundation::math::{inv_sqrt, Mat3, Quat, Vec3};
use layout::GpuMatrix;

/// Allowed drift of a quaternion's squared norm from 1 before it is
/// renormalized
pub const UNIT_TOLERANCE: f32 = 0.001;

/// Distance inside the opposite arena face a wrapped actor lands at,
/// keeping it from re-triggering the wrap on the next frame
pub const WRAP_EPSILON: f32 = 0.001;

/// Build the delta quaternion for one frame of Euler rotation
///
/// Half-angle construction in the fixed order yaw, roll, pitch. The
/// result is renormalized if its squared norm drifts past
/// [`UNIT_TOLERANCE`]; a degenerate norm at or below the tolerance floor
/// snaps to identity instead of dividing by a near-zero value.
#[must_use]
pub fn delta_quat(rate: &crate::actor::AngularRate, dt: f32) -> Quat {
    let (s1, c1) = (rate.yaw * 0.5 * dt).sin_cos();
    let (s2, c2) = (rate.roll * 0.5 * dt).sin_cos();
    let (s3, c3) = (rate.pitch * 0.5 * dt).sin_cos();

    let w = c1 * c2 * c3 - s1 * s2 * s3;
    let x = s1 * s2 * c3 + c1 * c2 * s3;
    let y = s1 * c2 * c3 + c1 * s2 * s3;
    let z = c1 * s2 * c3 - s1 * c2 * s3;

    let norm_sq = x * x + y * y + z * z + w * w;
    if (norm_sq - 1.0).abs() > UNIT_TOLERANCE {
        if norm_sq > UNIT_TOLERANCE {
            let scale = inv_sqrt(norm_sq);
            return Quat::new(w * scale, x * scale, y * scale, z * scale);
        }
        return Quat::identity();
    }
    Quat::new(w, x, y, z)
}

/// Standard rotation matrix for a near-unit quaternion
///
/// Columns are the actor's local axes expressed in world space.
#[must_use]
pub fn rotation_matrix(q: &Quat) -> Mat3 {
    let (x, y, z, w) = (q.i, q.j, q.k, q.w);
    Mat3::new(
        1.0 - 2.0 * y * y - 2.0 * z * z,
        2.0 * x * y - 2.0 * z * w,
        2.0 * x * z + 2.0 * y * w,
        2.0 * x * y + 2.0 * z * w,
        1.0 - 2.0 * x * x - 2.0 * z * z,
        2.0 * y * z - 2.0 * x * w,
        2.0 * x * z - 2.0 * y * w,
        2.0 * y * z + 2.0 * x * w,
        1.0 - 2.0 * x * x - 2.0 * y * y,
    )
}

/// Apply one frame of rotation to an actor and return its fresh rotation
/// matrix
///
/// The delta quaternion is left-composed onto the stored orientation
/// (`Q_new = Q_old ⊗ Q_delta`, Hamilton product), so the frame's rotation
/// happens in the actor's local axes.
pub fn rotate(actor: &mut Actor, dt: f32) -> Mat3 {
    let delta = delta_quat(&actor.angular_rate, dt);
    actor.orientation = actor.orientation * delta;
    rotation_matrix(&actor.orientation)
}

/// Advance an actor's position by `velocity * dt` with per-axis toroidal
/// wrap
///
/// Crossing an arena face re-enters from the opposite face,
/// [`WRAP_EPSILON`] inside the bound. Zero-velocity actors run the same
/// path as a no-op.
pub fn translate(actor: &mut Actor, arena_size: f32, dt: f32) {
    actor.position += actor.velocity * dt;
    for axis in 0..3 {
        let p = &mut actor.position[axis];
        if *p > arena_size {
            *p = -arena_size + WRAP_EPSILON;
        }
        if *p < -arena_size {
            *p = arena_size - WRAP_EPSILON;
        }
    }
}

/// Full per-actor per-frame pipeline: rotate, translate, compose
///
/// Returns the 16-float graphics-layout matrix ready for the renderer.
pub fn transform(actor: &mut Actor, arena_size: f32, dt: f32) -> GpuMatrix {
    let rotation = rotate(actor, dt);
    translate(actor, arena_size, dt);
    layout::compose(&rotation, actor.position)
}

/// Shot-spawn orientation: a 180 degree yaw applied to the conjugate-style
/// copy of the player's orientation, so the projectile travels along the
/// view direction (the -Z axis of the stored frame)
#[must_use]
pub fn shot_orientation(player: &Quat) -> Quat {
    Quat::new(player.j, -player.k, player.w, player.i)
}

/// World-space aim direction derived from the player's orientation
///
/// Algebraically this is the basis column of the graphics-layout matrix
/// for [`shot_orientation`] that points down the view axis: an identity
/// player orientation aims at (0, 0, -1). Extracted standalone because
/// shot velocity and reticule placement need it before any full transform
/// exists. Multiply by a speed scalar to get a shot velocity.
#[must_use]
pub fn aim_direction(player: &Quat) -> Vec3 {
    let q = shot_orientation(player);
    let (x, y, w) = (q.i, q.j, q.w);
    let z = q.k;
    Vec3::new(
        2.0 * x * z - 2.0 * y * w,
        2.0 * y * z + 2.0 * x * w,
        1.0 - 2.0 * x * x - 2.0 * y * y,
    )
}
