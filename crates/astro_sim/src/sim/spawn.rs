//! Randomized asteroid spawn parameters
//!
//! All randomness flows through the caller's RNG so a seeded simulation
//! replays deterministically.

use rand::Rng;

use crate::actor::{ActorPool, AngularRate, AsteroidTier};
use crate::foundation::math::Vec3;

/// Tier distribution for the startup/reset field: half medium, the rest
/// split evenly between large and small
pub fn field_tier<R: Rng>(rng: &mut R) -> AsteroidTier {
    if rng.gen::<bool>() {
        AsteroidTier::Med
    } else if rng.gen::<bool>() {
        AsteroidTier::Large
    } else {
        AsteroidTier::Small
    }
}

/// Tier distribution for the periodic trickle: medium or large, evenly
pub fn trickle_tier<R: Rng>(rng: &mut R) -> AsteroidTier {
    if rng.gen::<bool>() {
        AsteroidTier::Med
    } else {
        AsteroidTier::Large
    }
}

/// A spawn point on the far arena face, jittered across its area
///
/// An arena too small to jitter in (half-size rounding to zero) spawns at
/// the face center instead.
pub fn far_face_position<R: Rng>(rng: &mut R, arena_size: f32) -> Vec3 {
    let half = (arena_size * 0.5) as i32;
    let mut jitter = || {
        if half > 0 {
            rng.gen_range(-half..half) as f32
        } else {
            0.0
        }
    };
    let x = jitter();
    let y = jitter();
    Vec3::new(x, y, arena_size)
}

/// Drift velocity, up to half a unit per frame on each axis
pub fn random_velocity<R: Rng>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-100..100) as f32 * 0.005,
        rng.gen_range(-100..100) as f32 * 0.005,
        rng.gen_range(-100..100) as f32 * 0.005,
    )
}

/// Slow perpetual tumble
pub fn random_spin<R: Rng>(rng: &mut R) -> AngularRate {
    AngularRate {
        yaw: rng.gen_range(-200..200) as f32 * 0.0001,
        pitch: rng.gen_range(-200..200) as f32 * 0.0001,
        roll: rng.gen_range(-200..200) as f32 * 0.0001,
    }
}

/// Spawn one asteroid of `tier` on the far arena face
///
/// Returns false when the pool is full; the spawn is skipped, never
/// queued.
pub fn spawn_on_far_face<R: Rng>(
    pool: &mut ActorPool,
    tier: AsteroidTier,
    arena_size: f32,
    rng: &mut R,
) -> bool {
    let position = far_face_position(rng, arena_size);
    let velocity = random_velocity(rng);
    let spin = random_spin(rng);
    match pool.spawn() {
        Some(slot) => {
            slot.mass = tier.mass();
            slot.position = position;
            slot.velocity = velocity;
            slot.angular_rate = spin;
            true
        }
        None => false,
    }
}

/// Populate the startup/reset field of `count` asteroids
pub fn spawn_field<R: Rng>(pool: &mut ActorPool, count: usize, arena_size: f32, rng: &mut R) {
    for _ in 0..count {
        let tier = field_tier(rng);
        if !spawn_on_far_face(pool, tier, arena_size, rng) {
            break;
        }
    }
}
