//! Fixed-timestep accumulator
//!
//! Converts variable frame times into a whole number of simulation ticks so
//! motion stays independent of the render frame rate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed seconds and return how many ticks to run
    ///
    /// At most `max_substeps` ticks are returned. Time left over once the cap
    /// is hit is dropped, so a stall can't snowball into ever longer
    /// catch-up frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // One step of headroom past the cap so float error never costs a tick
        let max_frame_dt = self.step * (self.max_substeps + 1) as f32;
        self.accumulator += frame_dt.clamp(0.0, max_frame_dt);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::trace!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Fraction of a tick left over (0..1), for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}
