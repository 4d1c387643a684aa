//! Math utilities and types
//!
//! Provides fundamental math types for the simulation plus the fast
//! inverse-square-root used throughout the collision code.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for orientations
///
/// Deliberately *not* `Unit<Quaternion>`: the transform engine performs its
/// own tolerance-gated renormalization so that the documented drift bound is
/// observable behavior rather than something nalgebra hides.
pub type Quat = Quaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Newton-step multiplier tuned for improved accuracy over the classic
/// fast inverse sqrt constant (Douglas Wilhelm Harder's variant).
const NEWTON_TUNING: f32 = 1.000_876_311_302_185;

/// Fast approximate `1/sqrt(x)`
///
/// Bit-level magic-constant estimate refined by a single tuned
/// Newton-Raphson step. Accurate to well under 0.2% for positive inputs,
/// which is all the collision code needs for distance comparisons.
///
/// Callers compare `inv_sqrt(d * d) > threshold` instead of
/// `d < 1/threshold`: larger output means *smaller* distance, and every
/// comparison in the collision logic is written in that inverted direction.
///
/// The caller must not pass a negative value or a NaN; there is no error
/// path.
#[must_use]
pub fn inv_sqrt(x: f32) -> f32 {
    let half_tuned = 0.5 * NEWTON_TUNING * x;
    let bits = x.to_bits();
    let estimate = f32::from_bits(0x5f37_5a87 - (bits >> 1));
    estimate * (1.5 * NEWTON_TUNING - half_tuned * estimate * estimate)
}
