//! Score popups and targeting reticules

use crate::foundation::math::Vec3;

/// Age increment per frame-unit; a popup lives 1.0 / this frames
const AGE_RATE: f32 = 0.02;

/// Transient score text spawned where an asteroid was hit
///
/// `age` runs from 0 to 1 and doubles as the renderer's fade factor;
/// past 1.0 the popup despawns.
#[derive(Debug, Clone, Default)]
pub struct ScorePopup {
    /// Whether this slot is live
    pub spawned: bool,

    /// Short label, e.g. "+20"
    pub text: &'static str,

    /// Age/fade in [0, 1]
    pub age: f32,

    /// World-space position
    pub position: Vec3,
}

impl ScorePopup {
    /// Advance age; despawns once past 1.0
    pub fn age_by(&mut self, time_mod: f32) {
        if !self.spawned {
            return;
        }
        if self.age > 1.0 {
            self.spawned = false;
        } else {
            self.age += AGE_RATE * time_mod;
        }
    }
}

/// Claim the first free popup slot
pub fn claim(popups: &mut [ScorePopup], text: &'static str, position: Vec3) {
    if let Some(slot) = popups.iter_mut().find(|p| !p.spawned) {
        *slot = ScorePopup {
            spawned: true,
            text,
            age: 0.0,
            position,
        };
    }
}

/// A fixed targeting marker projected along the player's aim ray
#[derive(Debug, Clone)]
pub struct Reticule {
    /// Glyph drawn at the marker
    pub text: &'static str,

    /// Distance along the aim ray
    pub offset: f32,

    /// World-space position, recomputed every frame
    pub position: Vec3,
}

impl Reticule {
    /// The three standard markers: a far ring and two near crosses
    #[must_use]
    pub fn standard_set() -> [Self; 3] {
        let at = |text, offset| Self {
            text,
            offset,
            position: Vec3::zeros(),
        };
        [at("\u{f}", 100.0), at("+", 30.0), at("+", 10.0)]
    }
}
