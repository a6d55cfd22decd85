//! Fixed timestep accounting.
//!
//! The arena runs headless, so frame deltas come from the configuration
//! rather than a wall clock. Agents are always ticked with the fixed step.

/// Upper bound on fixed updates per frame.
const MAX_UPDATES_PER_FRAME: u32 = 10;

/// Frame timing manager.
#[derive(Debug)]
pub struct FrameTiming {
    /// Simulation ticks per second
    tick_rate: u32,
    /// Accumulator for fixed timestep
    accumulator: f32,
    /// Fixed timestep delta
    fixed_dt: f32,
    /// Maximum frame delta accepted before clamping
    max_dt: f32,
    /// Fixed updates performed so far
    total_updates: u64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameTiming {
    /// Create a new frame timing manager.
    ///
    /// # Arguments
    /// * `tick_rate` - Fixed updates per simulated second
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            accumulator: 0.0,
            fixed_dt: 1.0 / tick_rate as f32,
            max_dt: 0.25,
            total_updates: 0,
        }
    }

    /// Get the fixed timestep value.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Get the tick rate.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Fixed updates performed since creation or the last reset.
    #[must_use]
    pub fn total_updates(&self) -> u64 {
        self.total_updates
    }

    /// Accumulate time for fixed timestep updates.
    /// Returns the number of fixed updates that should be performed.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_dt) } else { 0.0 };
        self.accumulator += dt;
        let mut count = 0;

        // Tolerate float drift so that n frames of exactly fixed_dt give n updates
        let epsilon = self.fixed_dt * 1e-3;
        while self.accumulator + epsilon >= self.fixed_dt && count < MAX_UPDATES_PER_FRAME {
            self.accumulator = (self.accumulator - self.fixed_dt).max(0.0);
            count += 1;
        }

        // Still behind after the cap, drop the backlog
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        self.total_updates += u64::from(count);
        count
    }

    /// Reset timing (call after pause or loading).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.total_updates = 0;
    }
}
