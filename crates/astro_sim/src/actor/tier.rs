//! Asteroid size tiers

/// Asteroid size categories
///
/// The tier doubles as the actor's `mass` and governs scale, collision
/// radius, and splitting behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidTier {
    /// Small asteroid (destroyed completely when hit)
    Small,

    /// Medium asteroid (shrinks to small)
    Med,

    /// Large asteroid (shrinks to medium)
    Large,
}

impl AsteroidTier {
    /// The mass/scale value stored on the actor for this tier
    #[must_use]
    pub fn mass(self) -> f32 {
        match self {
            Self::Small => 1.0,
            Self::Med => 5.0,
            Self::Large => 10.0,
        }
    }

    /// Classify a stored mass back into a tier using the midpoint rule:
    /// above the large/med midpoint is large, above the med/small midpoint
    /// is medium, otherwise small
    #[must_use]
    pub fn classify(mass: f32) -> Self {
        if mass > (Self::Large.mass() + Self::Med.mass()) * 0.5 {
            Self::Large
        } else if mass > (Self::Med.mass() + Self::Small.mass()) * 0.5 {
            Self::Med
        } else {
            Self::Small
        }
    }

    /// The tier an asteroid shrinks to when hit, or `None` if it despawns
    #[must_use]
    pub fn split_into(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Med),
            Self::Med => Some(Self::Small),
            Self::Small => None,
        }
    }

    /// Points awarded for hitting this tier
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Large => 10,
            Self::Med => 20,
            Self::Small => 50,
        }
    }
}
