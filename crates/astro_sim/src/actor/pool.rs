//! Fixed-size actor pools with first-free-slot allocation

use super::Actor;

/// Fixed-capacity pool of actor slots
///
/// "Spawning" claims the first free slot by linear scan; "despawning"
/// clears the flag and leaves the slot reusable. Capacity exhaustion is a
/// policy, not an error: `spawn` simply returns `None` and the caller
/// skips the spawn.
#[derive(Debug)]
pub struct ActorPool {
    slots: Vec<Actor>,
}

impl ActorPool {
    /// Create a pool with `capacity` inert slots
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Actor::default(); capacity],
        }
    }

    /// Total slot count
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently spawned actors; never exceeds capacity
    #[must_use]
    pub fn spawned_count(&self) -> usize {
        self.slots.iter().filter(|a| a.spawned).count()
    }

    /// Claim the first free slot, mark it spawned, and return it reset to
    /// defaults. Returns `None` when every slot is live.
    pub fn spawn(&mut self) -> Option<&mut Actor> {
        let slot = self.slots.iter_mut().find(|a| !a.spawned)?;
        *slot = Actor {
            spawned: true,
            ..Actor::default()
        };
        Some(slot)
    }

    /// Clear the spawned flag on slot `index`
    pub fn despawn(&mut self, index: usize) {
        self.slots[index].despawn();
    }

    /// Despawn every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.despawn();
        }
    }

    /// Borrow a slot by index
    #[must_use]
    pub fn get(&self, index: usize) -> &Actor {
        &self.slots[index]
    }

    /// Mutably borrow a slot by index
    pub fn get_mut(&mut self, index: usize) -> &mut Actor {
        &mut self.slots[index]
    }

    /// Iterate all slots
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.slots.iter()
    }

    /// Iterate all slots mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.slots.iter_mut()
    }

    /// Iterate (index, actor) over spawned slots only
    pub fn iter_spawned(&self) -> impl Iterator<Item = (usize, &Actor)> {
        self.slots.iter().enumerate().filter(|(_, a)| a.spawned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_claims_first_free_slot() {
        let mut pool = ActorPool::new(4);
        pool.spawn().unwrap();
        pool.spawn().unwrap();
        pool.despawn(0);
        // Slot 0 is free again and gets claimed before slot 2
        pool.spawn().unwrap();
        assert!(pool.get(0).spawned);
        assert!(!pool.get(2).spawned);
        assert_eq!(pool.spawned_count(), 2);
    }

    #[test]
    fn test_exhausted_pool_skips_spawn() {
        let mut pool = ActorPool::new(2);
        assert!(pool.spawn().is_some());
        assert!(pool.spawn().is_some());
        assert!(pool.spawn().is_none());
        assert_eq!(pool.spawned_count(), pool.capacity());
    }

    #[test]
    fn test_spawn_resets_stale_slot_state() {
        let mut pool = ActorPool::new(1);
        {
            let actor = pool.spawn().unwrap();
            actor.mass = 10.0;
            actor.velocity.x = 3.0;
        }
        pool.despawn(0);
        let actor = pool.spawn().unwrap();
        assert_eq!(actor.mass, 0.0);
        assert_eq!(actor.velocity.x, 0.0);
    }

    #[test]
    fn test_clear_despawns_everything() {
        let mut pool = ActorPool::new(8);
        for _ in 0..5 {
            pool.spawn().unwrap();
        }
        pool.clear();
        assert_eq!(pool.spawned_count(), 0);
        assert_eq!(pool.iter_spawned().count(), 0);
    }
}
