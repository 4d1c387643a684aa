//! Camera rig: input consumption, drift-cam easing, view transform
//!
//! The rig is not an actor. It drives the player actor's rotation and
//! velocity from raw input, keeps visual-only drift state (roll, position
//! offset, field-of-view multiplier) that eases toward targets rather
//! than switching between modes, and produces the per-frame view matrix.

use crate::actor::Actor;
use crate::config::CameraConfig;
use crate::foundation::math::{constants::DEG_TO_RAD, Vec3};
use crate::input::{Controls, InputSnapshot};
use crate::transform::{self, layout, layout::GpuMatrix};

/// Drift roll clamp in degrees
const ROLL_CLAMP_DEG: f32 = 15.0;

/// Inside this band the drift roll snaps to neutral instead of easing
const ROLL_NEUTRAL_BAND: f32 = 1.0;

/// Accumulated idle frame-units before drift starts decaying
const IDLE_DECAY_THRESHOLD: f32 = 10.0;

/// Idle accumulators saturate here; only the threshold crossing matters
const IDLE_CAP: f32 = 1000.0;

/// Vertical offset clamp and neutral value
const OFFSET_MIN: f32 = -3.0;
const OFFSET_MAX: f32 = -1.0;
const OFFSET_NEUTRAL: f32 = -2.0;

/// Zoom-on-thrust rate constant resets here when thrust is released
const ZOOM_RATE_RESET: f32 = 0.02;

/// View frustum clip extents at the near plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Left clip plane offset
    pub left: f32,
    /// Right clip plane offset
    pub right: f32,
    /// Bottom clip plane offset
    pub bottom: f32,
    /// Top clip plane offset
    pub top: f32,
}

/// Camera rig state
///
/// Created once, mutated every frame by input and by its own easing
/// logic. Visual drift state is decoupled from the player's true
/// orientation.
#[derive(Debug)]
pub struct CameraRig {
    /// Controls held this frame
    pub controls: Controls,

    /// Drift-cam regime: when false, roll/offset always ease to neutral
    pub drift_cam: bool,

    /// Field-of-view multiplier fed into the frustum every frame
    pub fov_mod: f32,

    /// Visual-only position offset (drift and death recoil)
    pub pos_offset: Vec3,

    /// Visual-only roll angle in degrees
    pub roll: f32,

    rot_mod: f32,
    roll_mod: f32,
    vel_mod: f32,
    sensitivity: f32,

    zoom_rate: f32,
    yaw_idle: f32,
    pitch_idle: f32,
}

impl CameraRig {
    /// Create a rig from configuration, at the neutral startup pose
    #[must_use]
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            controls: Controls::empty(),
            drift_cam: true,
            fov_mod: 1.0,
            pos_offset: Vec3::new(0.0, OFFSET_NEUTRAL, config.z_offset),
            roll: 0.0,
            rot_mod: config.rotation_modifier,
            roll_mod: config.roll_modifier,
            vel_mod: config.velocity_modifier,
            sensitivity: config.sensitivity,
            zoom_rate: ZOOM_RATE_RESET,
            yaw_idle: 0.0,
            pitch_idle: 0.0,
        }
    }

    /// Reset the visual state the death sequence drifted: FOV multiplier
    /// and camera z-offset back to neutral
    pub fn reset_death_drift(&mut self, config: &CameraConfig) {
        self.fov_mod = 1.0;
        self.pos_offset.z = config.z_offset;
    }

    /// Consume one input snapshot: latch control flags and convert mouse
    /// motion and roll keys into the player's angular rate for this frame
    pub fn apply_input(&mut self, input: &InputSnapshot, player: &mut Actor, time_mod: f32) {
        self.controls = input.controls;
        self.drift_cam = input.drift_cam;

        if input.mouse_dx != 0.0 {
            player.angular_rate.yaw = -self.rot_mod * self.sensitivity * input.mouse_dx;
        }
        if input.mouse_dy != 0.0 {
            player.angular_rate.pitch = -self.rot_mod * self.sensitivity * input.mouse_dy;
        }
        if self.controls.contains(Controls::ROLL_CCW) {
            player.angular_rate.roll = self.roll_mod * self.rot_mod * time_mod;
        }
        if self.controls.contains(Controls::ROLL_CW) {
            player.angular_rate.roll = -self.roll_mod * self.rot_mod * time_mod;
        }
    }

    /// Run the per-frame camera pipeline and return the view matrix
    ///
    /// Rotates the player from its pending angular rate (then clears it:
    /// the rate is an input signal, not persistent spin), applies
    /// drift-cam easing, accelerates along the freshly rotated local
    /// axes, integrates and wraps the player position, and composes
    /// rotation with the rotated translation.
    pub fn update(&mut self, player: &mut Actor, arena_size: f32, dt: f32) -> GpuMatrix {
        // Idle accounting drives drift decay
        if player.angular_rate.yaw.abs() < 1e-6 {
            if self.yaw_idle < IDLE_CAP {
                self.yaw_idle += dt;
            }
        } else {
            self.yaw_idle = 0.0;
        }
        if player.angular_rate.pitch.abs() < 1e-6 {
            if self.pitch_idle < IDLE_CAP {
                self.pitch_idle += dt;
            }
        } else {
            self.pitch_idle = 0.0;
        }

        // Drift accumulates proportionally to rotation input
        if self.drift_cam {
            self.roll += player.angular_rate.yaw * 0.5 * dt / DEG_TO_RAD;
            self.pos_offset.y -= player.angular_rate.pitch * 0.02 * dt / DEG_TO_RAD;
        }
        if self.yaw_idle > IDLE_DECAY_THRESHOLD || !self.drift_cam {
            if self.roll < -ROLL_NEUTRAL_BAND {
                self.roll += 0.5 * dt;
            } else if self.roll > ROLL_NEUTRAL_BAND {
                self.roll -= 0.5 * dt;
            } else {
                self.roll = 0.0;
            }
        }
        if self.pitch_idle > IDLE_DECAY_THRESHOLD || !self.drift_cam {
            if self.pos_offset.y < OFFSET_NEUTRAL - 0.05 {
                self.pos_offset.y += 0.02 * dt;
            } else if self.pos_offset.y > OFFSET_NEUTRAL + 0.05 {
                self.pos_offset.y -= 0.02 * dt;
            } else {
                self.pos_offset.y = OFFSET_NEUTRAL;
            }
        }
        self.pos_offset.x = 0.1 * self.roll;
        self.roll = self.roll.clamp(-ROLL_CLAMP_DEG, ROLL_CLAMP_DEG);
        self.pos_offset.y = self.pos_offset.y.clamp(OFFSET_MIN, OFFSET_MAX);

        // Rotate, then retire the consumed input signal
        let rotation = transform::rotate(player, dt);
        player.angular_rate.clear();

        if player.spawned {
            // Thrust along the local Z axis, with zoom-on-thrust easing
            if self.controls.contains(Controls::FORWARD) ^ self.controls.contains(Controls::BACKWARD)
            {
                if self.zoom_rate > 0.005 {
                    self.zoom_rate -= 0.001 * dt;
                }
                let axis = rotation.column(2) * self.vel_mod * dt;
                if self.controls.contains(Controls::FORWARD) {
                    player.velocity += axis;
                    if self.fov_mod < 1.2 && self.drift_cam {
                        self.fov_mod += dt * self.zoom_rate;
                    }
                } else {
                    player.velocity -= axis;
                    if self.fov_mod > 0.8 && self.drift_cam {
                        self.fov_mod -= dt * self.zoom_rate;
                    }
                }
            } else {
                self.zoom_rate = ZOOM_RATE_RESET;
                if self.fov_mod > 1.02 {
                    self.fov_mod -= 1.5 * dt * self.zoom_rate;
                } else if self.fov_mod < 0.98 {
                    self.fov_mod += 1.5 * dt * self.zoom_rate;
                } else {
                    self.fov_mod = 1.0;
                }
            }
            // Strafe along the local X axis
            if self.controls.contains(Controls::LEFT) ^ self.controls.contains(Controls::RIGHT) {
                let axis = rotation.column(0) * self.vel_mod * dt;
                if self.controls.contains(Controls::LEFT) {
                    player.velocity += axis;
                } else {
                    player.velocity -= axis;
                }
            }
            // Local Y axis; sign convention inverted relative to the
            // forward/back pattern, kept as the original behaves
            if self.controls.contains(Controls::UP) ^ self.controls.contains(Controls::DOWN) {
                let axis = rotation.column(1) * self.vel_mod * dt;
                if self.controls.contains(Controls::UP) {
                    player.velocity -= axis;
                } else {
                    player.velocity += axis;
                }
            }
            transform::translate(player, arena_size, dt);
        }

        layout::compose_view(&rotation, player.position)
    }

    /// Per-frame frustum from the current FOV multiplier
    ///
    /// The multiplier links camera easing to the visible frustum, so this
    /// must be recomputed every frame.
    #[must_use]
    pub fn frustum(&self, fov_deg: f32, aspect_ratio: f32, near_clip: f32) -> Frustum {
        let top = (fov_deg * self.fov_mod * DEG_TO_RAD * 0.5).tan() * near_clip;
        let bottom = -top;
        let left = aspect_ratio * bottom;
        Frustum {
            left,
            right: -left,
            bottom,
            top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default())
    }

    fn player() -> Actor {
        Actor::spawned_at_origin(1.0)
    }

    #[test]
    fn test_mouse_motion_sets_angular_rate() {
        let mut rig = rig();
        let mut p = player();
        let input = InputSnapshot {
            mouse_dx: 10.0,
            mouse_dy: -4.0,
            drift_cam: true,
            ..InputSnapshot::default()
        };
        rig.apply_input(&input, &mut p, 1.0);
        assert!(p.angular_rate.yaw < 0.0);
        assert!(p.angular_rate.pitch > 0.0);
    }

    #[test]
    fn test_angular_rate_cleared_after_update() {
        let mut rig = rig();
        let mut p = player();
        p.angular_rate.yaw = 0.01;
        rig.update(&mut p, 500.0, 1.0);
        assert_eq!(p.angular_rate.yaw, 0.0);
        assert_eq!(p.angular_rate.pitch, 0.0);
        assert_eq!(p.angular_rate.roll, 0.0);
    }

    #[test]
    fn test_drift_roll_accumulates_and_clamps() {
        let mut rig = rig();
        let mut p = player();
        for _ in 0..200 {
            p.angular_rate.yaw = 0.05;
            rig.update(&mut p, 500.0, 1.0);
        }
        assert_relative_eq!(rig.roll, ROLL_CLAMP_DEG, epsilon = 1e-4);
        assert_relative_eq!(rig.pos_offset.x, 0.1 * rig.roll, epsilon = 0.2);
    }

    #[test]
    fn test_drift_decays_after_idle() {
        let mut rig = rig();
        let mut p = player();
        for _ in 0..40 {
            p.angular_rate.yaw = 0.02;
            rig.update(&mut p, 500.0, 1.0);
        }
        assert!(rig.roll > ROLL_NEUTRAL_BAND);
        // Quiescent input: idle passes the threshold, then roll eases back
        for _ in 0..100 {
            rig.update(&mut p, 500.0, 1.0);
        }
        assert_eq!(rig.roll, 0.0);
    }

    #[test]
    fn test_drift_disabled_decays_immediately() {
        let mut rig = rig();
        rig.drift_cam = false;
        rig.roll = 8.0;
        let mut p = player();
        for _ in 0..30 {
            rig.update(&mut p, 500.0, 1.0);
        }
        assert_eq!(rig.roll, 0.0);
    }

    #[test]
    fn test_vertical_offset_stays_clamped() {
        let mut rig = rig();
        let mut p = player();
        for _ in 0..500 {
            p.angular_rate.pitch = 0.05;
            rig.update(&mut p, 500.0, 1.0);
        }
        assert!(rig.pos_offset.y >= OFFSET_MIN && rig.pos_offset.y <= OFFSET_MAX);
    }

    #[test]
    fn test_forward_thrust_accelerates_local_forward() {
        let mut rig = rig();
        let mut p = player();
        rig.controls = Controls::FORWARD;
        rig.update(&mut p, 500.0, 1.0);
        assert!(p.velocity.z > 0.0);
        assert_relative_eq!(p.velocity.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_up_down_sign_quirk_preserved() {
        let mut rig = rig();
        let mut p = player();
        rig.controls = Controls::UP;
        rig.update(&mut p, 500.0, 1.0);
        assert!(p.velocity.y < 0.0);
    }

    #[test]
    fn test_fov_eases_up_on_thrust_and_back_to_neutral() {
        let mut rig = rig();
        let mut p = player();
        rig.controls = Controls::FORWARD;
        for _ in 0..30 {
            rig.update(&mut p, 500.0, 1.0);
        }
        assert!(rig.fov_mod > 1.0);
        assert!(rig.fov_mod <= 1.2 + ZOOM_RATE_RESET);
        rig.controls = Controls::empty();
        for _ in 0..200 {
            rig.update(&mut p, 500.0, 1.0);
        }
        assert_relative_eq!(rig.fov_mod, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fov_easing_needs_drift_cam() {
        let mut rig = rig();
        rig.drift_cam = false;
        let mut p = player();
        rig.controls = Controls::FORWARD;
        for _ in 0..30 {
            rig.update(&mut p, 500.0, 1.0);
        }
        assert_relative_eq!(rig.fov_mod, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_frustum_tracks_fov_mod() {
        let mut rig = rig();
        let narrow = rig.frustum(80.0, 4.0 / 3.0, 1.0);
        rig.fov_mod = 1.2;
        let wide = rig.frustum(80.0, 4.0 / 3.0, 1.0);
        assert!(wide.top > narrow.top);
        assert_relative_eq!(narrow.right, -narrow.left, epsilon = 1e-6);
        assert_relative_eq!(narrow.bottom, -narrow.top, epsilon = 1e-6);
    }

    #[test]
    fn test_dead_player_keeps_position() {
        let mut rig = rig();
        let mut p = player();
        p.spawned = false;
        p.velocity = Vec3::new(1.0, 0.0, 0.0);
        rig.controls = Controls::FORWARD;
        rig.update(&mut p, 500.0, 1.0);
        assert_eq!(p.position, Vec3::zeros());
    }
}
