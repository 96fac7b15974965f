//! Simulated sensor readings driven by the keyboard.

use rainwatch_common::SensorSample;
use rainwatch_common::thresholds::ADC_MAX;

/// Raw counts added or removed per key press.
pub const KEY_STEP: u16 = 128;

/// Which reading a key press adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Rain,
    Level,
}

/// A key press mapped onto the readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjust {
    Up(Axis),
    Down(Axis),
    Reset,
}

/// The two raw ADC values the simulator feeds into the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readings {
    rain_raw: u16,
    level_raw: u16,
}

impl Readings {
    pub const fn new() -> Self {
        Self {
            rain_raw: 0,
            level_raw: 0,
        }
    }

    /// Apply one key press, clamping to the 12-bit ADC range.
    pub fn apply(
        &mut self,
        adjust: Adjust,
    ) {
        match adjust {
            Adjust::Up(axis) => {
                let raw = self.axis_mut(axis);
                *raw = raw.saturating_add(KEY_STEP).min(ADC_MAX);
            }
            Adjust::Down(axis) => {
                let raw = self.axis_mut(axis);
                *raw = raw.saturating_sub(KEY_STEP);
            }
            Adjust::Reset => *self = Self::new(),
        }
    }

    /// What the firmware's ADC would have returned this tick.
    #[inline]
    pub const fn sample(&self) -> SensorSample { SensorSample::new(self.rain_raw, self.level_raw) }

    fn axis_mut(
        &mut self,
        axis: Axis,
    ) -> &mut u16 {
        match axis {
            Axis::Rain => &mut self.rain_raw,
            Axis::Level => &mut self.level_raw,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
