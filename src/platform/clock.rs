//! Fixed timestep accumulator
//!
//! Converts measured frame time into whole simulation steps.

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_substeps,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.sim_dt(), MAX_SUBSTEPS)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Feed one frame's delta; returns how many steps to simulate.
    /// Deltas are clamped to [0, MAX_FRAME_DT] and time beyond
    /// `max_substeps` is dropped to prevent a spiral of death.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if self.accumulator >= self.step {
            log::debug!(
                "Dropping {:.3}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.step;
        }
        substeps
    }
}
