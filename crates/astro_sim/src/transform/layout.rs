//! Graphics-API matrix layout adapter
//!
//! The fixed-function renderer consumes 16-float column-major matrices
//! whose upper 3x3 holds the rotation's basis vectors as *rows* (the
//! transpose of the standard rotation). That convention is confined to
//! this module: everything else in the crate works with standard
//! matrices, and the transpose is applied exactly once here.

use crate::foundation::math::{Mat3, Vec3};

/// 16-float column-major matrix in the renderer's layout
pub type GpuMatrix = [f32; 16];

/// Compose a model matrix: basis-transposed rotation plus a raw world
/// translation column
#[must_use]
pub fn compose(rotation: &Mat3, translation: Vec3) -> GpuMatrix {
    let r = rotation;
    [
        r[(0, 0)],
        r[(0, 1)],
        r[(0, 2)],
        0.0,
        r[(1, 0)],
        r[(1, 1)],
        r[(1, 2)],
        0.0,
        r[(2, 0)],
        r[(2, 1)],
        r[(2, 2)],
        0.0,
        translation.x,
        translation.y,
        translation.z,
        1.0,
    ]
}

/// Compose the view matrix: same rotation layout, but the translation
/// column is the camera-relative position rotated into view axes
/// (`Rᵀ · position`), coupling translation to the just-updated rotation
#[must_use]
pub fn compose_view(rotation: &Mat3, position: Vec3) -> GpuMatrix {
    let rotated = rotation.transpose() * position;
    compose(rotation, rotated)
}

/// The translation column of a composed matrix
#[must_use]
pub fn translation_of(m: &GpuMatrix) -> Vec3 {
    Vec3::new(m[12], m[13], m[14])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_composes_to_identity() {
        let m = compose(&Mat3::identity(), Vec3::zeros());
        for col in 0..4 {
            for row in 0..4 {
                let expect = if col == row { 1.0 } else { 0.0 };
                assert_relative_eq!(m[col * 4 + row], expect, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_rotation_block_is_transposed() {
        // 90 degree yaw: standard R maps +Z to +X; stored layout must
        // hold R's rows in its float columns
        let r = Mat3::new(
            0.0, 0.0, 1.0, //
            0.0, 1.0, 0.0, //
            -1.0, 0.0, 0.0,
        );
        let m = compose(&r, Vec3::zeros());
        // First float column = first row of R
        assert_relative_eq!(m[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(m[2], 1.0, epsilon = 1e-6);
        // Third float column = third row of R
        assert_relative_eq!(m[8], -1.0, epsilon = 1e-6);
        assert_relative_eq!(m[10], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_model_translation_is_raw() {
        let t = Vec3::new(1.0, -2.0, 3.0);
        let m = compose(&Mat3::identity(), t);
        assert_eq!(translation_of(&m), t);
    }

    #[test]
    fn test_view_translation_rotates_with_camera() {
        // With a 90 degree yaw the view translation picks up the rotated
        // components rather than the raw ones
        let r = Mat3::new(
            0.0, 0.0, 1.0, //
            0.0, 1.0, 0.0, //
            -1.0, 0.0, 0.0,
        );
        let pos = Vec3::new(5.0, 0.0, 0.0);
        let m = compose_view(&r, pos);
        let t = translation_of(&m);
        assert_relative_eq!(t.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(t.z, 5.0, epsilon = 1e-6);
    }
}
