//! Input-collaborator boundary
//!
//! The simulation never parses device events. The windowing layer hands it
//! one [`InputSnapshot`] per frame: which controls are currently held plus
//! the frame's raw mouse delta.

use bitflags::bitflags;

bitflags! {
    /// Held-control flags for one frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Controls: u16 {
        /// Thrust along the local forward axis
        const FORWARD = 1 << 0;
        /// Thrust along the local backward axis
        const BACKWARD = 1 << 1;
        /// Strafe along the local left axis
        const LEFT = 1 << 2;
        /// Strafe along the local right axis
        const RIGHT = 1 << 3;
        /// Strafe along the local up axis
        const UP = 1 << 4;
        /// Strafe along the local down axis
        const DOWN = 1 << 5;
        /// Roll counter-clockwise
        const ROLL_CCW = 1 << 6;
        /// Roll clockwise
        const ROLL_CW = 1 << 7;
        /// Fire projectiles
        const SHOOT = 1 << 8;
    }
}

/// Per-frame input state from the windowing collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Controls held during this frame
    pub controls: Controls,

    /// Raw horizontal mouse motion for this frame
    pub mouse_dx: f32,

    /// Raw vertical mouse motion for this frame
    pub mouse_dy: f32,

    /// Whether drift-cam mode is enabled (toggled upstream on key press)
    pub drift_cam: bool,
}

impl InputSnapshot {
    /// Snapshot with drift-cam on and nothing held, the startup state
    #[must_use]
    pub fn idle() -> Self {
        Self {
            drift_cam: true,
            ..Self::default()
        }
    }
}
