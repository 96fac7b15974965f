//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Sampling period, matching the firmware's 10 Hz ticker.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(100);

/// Pause each simulated consumer takes after handling a sample.
pub const CONSUMER_SETTLE: Duration = Duration::from_millis(50);

#[inline]
pub const fn millis(ms: u32) -> Duration { Duration::from_millis(ms as u64) }
