//! Renderer-collaborator boundary
//!
//! One [`FramePacket`] per frame: transform matrices, scale factors, and
//! HUD scalars as plain data. The simulation formats nothing and owns no
//! GPU state; a renderer walks the packet and issues its own draw calls.

use crate::actor::AsteroidTier;
use crate::camera::Frustum;
use crate::transform::layout::GpuMatrix;

/// Which mesh a draw call refers to
///
/// Opaque to the simulation: it only matters that the asset collaborator
/// associated each kind with a drawable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    /// Player ship
    Player,
    /// Projectile
    Projectile,
    /// Asteroid
    Asteroid,
    /// Death blast effect
    Blast,
    /// Arena bounding box wireframe
    Bounds,
}

/// One actor to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// Mesh to draw
    pub mesh: MeshKind,

    /// Composed transform in the renderer's layout
    pub matrix: GpuMatrix,

    /// Uniform scale applied after the transform (asteroid tier mass,
    /// blast growth)
    pub scale: f32,

    /// Tier for material/tint selection; `None` for non-asteroids
    pub tier: Option<AsteroidTier>,
}

/// A positioned piece of HUD text in world space
#[derive(Debug, Clone, PartialEq)]
pub struct TextMarker {
    /// Text to draw
    pub text: String,

    /// World-space position
    pub position: [f32; 3],

    /// Age in [0, 1]; doubles as a fade factor. Always 0 for reticules.
    pub age: f32,
}

/// Scalar HUD values; the renderer formats and places them
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HudStats {
    /// Current score
    pub score: u32,

    /// Best score this process lifetime
    pub top_score: u32,

    /// Player speed relative to the arena, display units
    pub relative_velocity: f32,

    /// Raw milliseconds of the previous displayed frame
    pub frame_ms: u64,

    /// Display rate implied by `frame_ms`; 0 until a frame interval exists
    pub fps: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacket {
    /// View matrix from the camera rig
    pub view: GpuMatrix,

    /// Frustum clip extents for this frame's FOV multiplier
    pub frustum: Frustum,

    /// Visual-only camera offset and roll (drift-cam)
    pub camera_offset: [f32; 3],

    /// Visual-only camera roll in degrees
    pub camera_roll: f32,

    /// Skybox center: the player's world-space position
    pub skybox_center: [f32; 3],

    /// Whether the player ship itself should be drawn
    pub player_visible: bool,

    /// Spawned actors to draw
    pub draws: Vec<DrawCall>,

    /// Score popups currently alive
    pub popups: Vec<TextMarker>,

    /// Targeting reticule markers
    pub reticules: Vec<TextMarker>,

    /// HUD scalar values
    pub hud: HudStats,
}
