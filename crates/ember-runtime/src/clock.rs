//! Fixed-period frame pacing with oversleep correction
//!
//! A sleep call routinely returns later than requested; the excess is
//! measured and subtracted from the next frame's sleep so the long-run
//! average period stays on target. A step that overruns its period gets no
//! sleep at all and the correction resets to zero — the loop never skips
//! steps to catch up.

use std::time::{Duration, Instant};

/// Paces a loop at a fixed target period.
pub struct FrameTimer {
    target_period: Duration,
    /// Start of the current step; dt is measured between consecutive starts
    step_start: Instant,
    /// How much longer the previous sleep lasted than requested
    over_sleep: Duration,
}

impl FrameTimer {
    /// Create a timer targeting `target_fps` steps per second.
    ///
    /// The first step start is backdated by one period so the initial dt is
    /// a full frame rather than a near-zero value.
    pub fn new(target_fps: u32) -> Self {
        let target_period = Duration::from_secs(1) / target_fps.max(1);
        let now = Instant::now();
        Self {
            target_period,
            step_start: now.checked_sub(target_period).unwrap_or(now),
            over_sleep: Duration::ZERO,
        }
    }

    pub fn target_period(&self) -> Duration {
        self.target_period
    }

    /// Mark the start of a step and return the elapsed seconds since the
    /// previous step started.
    pub fn begin_step(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.step_start).as_secs_f32();
        self.step_start = now;
        dt
    }

    /// Sleep away the residual of the current period, corrected for the
    /// previous frame's oversleep. A no-op when the step overran its period.
    pub fn sleep_remainder(&mut self) {
        let step_end = Instant::now();
        let busy = step_end.duration_since(self.step_start);

        match self.target_period.checked_sub(busy + self.over_sleep) {
            Some(requested) if !requested.is_zero() => {
                std::thread::sleep(requested);
                let actual = Instant::now().duration_since(step_end);
                self.over_sleep = actual.saturating_sub(requested);
            }
            _ => self.over_sleep = Duration::ZERO,
        }
    }
}
