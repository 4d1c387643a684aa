//! Frame timing and adaptive timestep normalization

/// Target interval for one simulation step, in milliseconds (60 Hz)
pub const TARGET_FRAME_MS: f32 = 50.0 / 3.0;

/// Upper clamp on a raw frame delta, in milliseconds
///
/// Protects against huge jumps after a debugger stall or a suspended
/// window: anything longer is simulated as a 250 ms frame.
pub const MAX_FRAME_MS: f32 = 250.0;

/// One normalized simulation step produced by [`FrameClock::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep {
    /// Dimensionless modifier: simulated delta / target interval.
    /// Every motion/spin increment in the simulation scales by this.
    pub time_mod: f32,

    /// Simulated milliseconds consumed by this step
    pub sim_ms: f32,

    /// Raw wall-clock milliseconds since the previous displayed frame,
    /// for HUD frame-time/FPS readouts
    pub raw_ms: u64,
}

/// Adaptive-timestep clock decoupling simulation rate from display refresh
///
/// A frame slower than the target interval is simulated as one target-sized
/// step, with the remainder carried into the following frames, so motion
/// stays visually consistent at 30 Hz and at higher refresh rates. While
/// carry remains, newly elapsed wall time is not accumulated.
#[derive(Debug)]
pub struct FrameClock {
    target_ms: f32,
    carry_ms: f32,
    capped_last: bool,
    prev_ms: Option<u64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TARGET_FRAME_MS)
    }
}

impl FrameClock {
    /// Create a clock with the given target step interval in milliseconds
    #[must_use]
    pub fn new(target_ms: f32) -> Self {
        Self {
            target_ms,
            carry_ms: 0.0,
            capped_last: false,
            prev_ms: None,
        }
    }

    /// The configured target step interval in milliseconds
    #[must_use]
    pub fn target_ms(&self) -> f32 {
        self.target_ms
    }

    /// Advance the clock to `now_ms` and produce the next simulation step
    ///
    /// Call exactly once per displayed frame. The very first call yields a
    /// full target-sized step.
    pub fn tick(&mut self, now_ms: u64) -> TimeStep {
        let first = self.prev_ms.is_none();
        let raw_ms = self.prev_ms.map_or(0, |prev| now_ms.saturating_sub(prev));
        self.prev_ms = Some(now_ms);

        if self.carry_ms < 1e-4 {
            let elapsed = if first { self.target_ms } else { raw_ms as f32 };
            self.carry_ms = elapsed.min(MAX_FRAME_MS);
        }

        let sim_ms = if self.carry_ms > self.target_ms {
            self.capped_last = true;
            self.target_ms
        } else if self.capped_last {
            self.capped_last = false;
            // Swallow a sub-20% remainder into a full step instead of
            // simulating a micro-step right after a capped frame
            if self.carry_ms > self.target_ms * 0.2 {
                self.carry_ms
            } else {
                self.target_ms
            }
        } else {
            self.carry_ms
        };
        self.carry_ms -= sim_ms;

        TimeStep {
            time_mod: sim_ms / self.target_ms,
            sim_ms,
            raw_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_is_full_step() {
        let mut clock = FrameClock::default();
        let step = clock.tick(1000);
        assert_relative_eq!(step.time_mod, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nominal_frame_passes_through() {
        let mut clock = FrameClock::default();
        clock.tick(0);
        let step = clock.tick(10);
        assert_relative_eq!(step.sim_ms, 10.0, epsilon = 1e-4);
        assert_relative_eq!(step.time_mod, 10.0 / TARGET_FRAME_MS, epsilon = 1e-5);
        assert_eq!(step.raw_ms, 10);
    }

    #[test]
    fn test_slow_frame_is_capped_and_carried() {
        let mut clock = FrameClock::default();
        clock.tick(0);
        // 50 ms frame: one target step now, carry simulated over the
        // following frames
        let step = clock.tick(50);
        assert_relative_eq!(step.time_mod, 1.0, epsilon = 1e-6);
        let mut total = step.sim_ms;
        for now in [60, 70, 80] {
            let step = clock.tick(now);
            assert!(step.time_mod <= 1.0 + 1e-6);
            total += step.sim_ms;
            if (total - 50.0).abs() < 1e-3 {
                return;
            }
        }
        panic!("carry never drained: simulated {total} of 50 ms");
    }

    #[test]
    fn test_huge_stall_clamps_to_max() {
        let mut clock = FrameClock::default();
        clock.tick(0);
        let mut remaining = MAX_FRAME_MS;
        let mut now = 5000;
        // A 5 s stall simulates only 250 ms worth of steps
        loop {
            let step = clock.tick(now);
            remaining -= step.sim_ms;
            now += 1;
            if remaining < 1e-3 {
                break;
            }
            assert!(remaining > -1e-3);
        }
    }

    #[test]
    fn test_tiny_remainder_rounds_up_to_full_step() {
        let mut clock = FrameClock::default();
        clock.tick(0);
        // 18 ms: capped step of ~16.67, remainder ~1.33 < 20% of target
        clock.tick(18);
        let step = clock.tick(35);
        assert_relative_eq!(step.time_mod, 1.0, epsilon = 1e-6);
    }
}
