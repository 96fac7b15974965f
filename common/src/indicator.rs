//! Bicolor status indicator mapping.
//!
//! | Combined severity | Red  | Green |
//! |-------------------|------|-------|
//! | Alert             | full | off   |
//! | Attention         | full | full  |
//! | Normal            | off  | full  |
//!
//! No hysteresis: the mapping is re-evaluated on every sample.

use crate::severity::Severity;

/// PWM counter top for the indicator LEDs. A compare value equal to this is fully on.
pub const INDICATOR_PWM_TOP: u16 = 100;

/// PWM clock divider for the indicator LEDs.
pub const INDICATOR_PWM_DIVIDER: u8 = 4;

/// Brightness for a fully lit channel.
pub const INDICATOR_FULL: u16 = INDICATOR_PWM_TOP;

/// Brightness for a dark channel.
pub const INDICATOR_OFF: u16 = 0;

/// PWM compare levels for the red and green indicator channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorLevels {
    pub red: u16,
    pub green: u16,
}

impl IndicatorLevels {
    pub const fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Alert => Self {
                red: INDICATOR_FULL,
                green: INDICATOR_OFF,
            },
            Severity::Attention => Self {
                red: INDICATOR_FULL,
                green: INDICATOR_FULL,
            },
            Severity::Normal => Self {
                red: INDICATOR_OFF,
                green: INDICATOR_FULL,
            },
        }
    }
}
