//! Fixed timestep accumulator
//!
//! Real frame time goes in, a bounded number of fixed-size ticks come out.
//! The renderer always draws the most recently stepped state; there is no
//! interpolation between ticks.

use crate::consts::MAX_TICKS_PER_FRAME;
use crate::error::{Error, Result};

/// Accumulates wall-clock time and converts it into whole simulation ticks
#[derive(Debug, Clone)]
pub struct SimulationClock {
    accumulated: f64,
    fixed_step: f64,
    max_accumulated: f64,
}

impl SimulationClock {
    /// Create a clock with the given tick size and catch-up cap (seconds)
    pub fn new(fixed_step: f64, max_accumulated: f64) -> Result<Self> {
        if !(fixed_step.is_finite() && fixed_step > 0.0) {
            return Err(Error::invalid(format!(
                "fixed step must be positive, got {fixed_step}"
            )));
        }
        if !(max_accumulated.is_finite() && max_accumulated >= fixed_step) {
            return Err(Error::invalid(format!(
                "accumulator cap {max_accumulated} must be >= fixed step {fixed_step}"
            )));
        }
        if max_accumulated / fixed_step > f64::from(MAX_TICKS_PER_FRAME) {
            return Err(Error::invalid(format!(
                "cap {max_accumulated} / step {fixed_step} allows more than {MAX_TICKS_PER_FRAME} ticks per frame"
            )));
        }
        Ok(Self {
            accumulated: 0.0,
            fixed_step,
            max_accumulated,
        })
    }

    #[inline]
    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    #[inline]
    pub fn max_accumulated(&self) -> f64 {
        self.max_accumulated
    }

    /// Time carried over to the next call (always < fixed step)
    #[inline]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Drop any carried-over time
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Add `delta` seconds and invoke `step` once per whole tick.
    ///
    /// Time above the cap is discarded before stepping, so a long stall costs
    /// at most `max_accumulated / fixed_step` ticks. Returns the tick count.
    pub fn advance(&mut self, delta: f64, mut step: impl FnMut()) -> Result<u32> {
        if !(delta.is_finite() && delta >= 0.0) {
            return Err(Error::invalid(format!(
                "frame delta must be a non-negative duration, got {delta}"
            )));
        }

        self.accumulated = (self.accumulated + delta).min(self.max_accumulated);

        let mut ticks = (self.accumulated / self.fixed_step).floor() as u32;
        self.accumulated = (self.accumulated - f64::from(ticks) * self.fixed_step).max(0.0);
        // Rounding in the subtraction can leave exactly one more tick behind
        while self.accumulated >= self.fixed_step {
            self.accumulated -= self.fixed_step;
            ticks += 1;
        }

        for _ in 0..ticks {
            step();
        }
        Ok(ticks)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            accumulated: 0.0,
            fixed_step: crate::consts::SIM_DT,
            max_accumulated: crate::consts::MAX_ACCUMULATED,
        }
    }
}
