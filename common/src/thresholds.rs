//! Centralized sensor threshold configuration.
//!
//! Two independent tables exist and are deliberately kept apart:
//!
//! - [`RAW_THRESHOLDS`]: ADC-count cutoffs used by the severity classifier, and
//!   through it by the indicator, the LED matrix and the alarm.
//! - [`PERCENT_THRESHOLDS`]: normalized-percentage cutoffs used only by the
//!   display's full-screen alert overlay.
//!
//! Under the `/ 4088` normalization the two tables do not describe the same
//! physical cutoffs (raw 3271 is 80.01 %, raw 2862 is 70.01 %), and the
//! percentage table has no Attention level at all.
//!
//! # Compile-Time Validation
//!
//! Each table includes `const` assertions that verify ordering at compile time.
//! If a threshold is edited into the wrong order, compilation fails.

// =============================================================================
// ADC Scale
// =============================================================================

/// Largest value the 12-bit ADC can report.
pub const ADC_MAX: u16 = 4095;

/// Divisor used to turn raw counts into percent.
///
/// Inherited calibration constant: slightly below [`ADC_MAX`], so a full-scale
/// reading normalizes to about 100.17 %.
pub const NORMALIZE_FULL_SCALE: f32 = 4088.0;

// =============================================================================
// Raw-Count Table (classifier)
// =============================================================================

/// Raw-count cutoffs for one sensor axis.
///
/// A reading strictly above `alert` is Alert, strictly above `attention` is
/// Attention, anything else is Normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAxisThresholds {
    /// Readings above this value are at least Attention.
    pub attention: u16,
    /// Readings above this value are Alert.
    pub alert: u16,
}

/// Raw-count cutoffs for both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawThresholds {
    pub rain: RawAxisThresholds,
    pub level: RawAxisThresholds,
}

/// Rainfall reading where Attention begins (exclusive).
pub const RAIN_ATTENTION_RAW: u16 = 1635;

/// Rainfall reading where Alert begins (exclusive).
pub const RAIN_ALERT_RAW: u16 = 3271;

/// Water-level reading where Attention begins (exclusive).
pub const LEVEL_ATTENTION_RAW: u16 = 1635;

/// Water-level reading where Alert begins (exclusive).
pub const LEVEL_ALERT_RAW: u16 = 2862;

const _: () = assert!(RAIN_ATTENTION_RAW < RAIN_ALERT_RAW);
const _: () = assert!(RAIN_ALERT_RAW < ADC_MAX);
const _: () = assert!(LEVEL_ATTENTION_RAW < LEVEL_ALERT_RAW);
const _: () = assert!(LEVEL_ALERT_RAW < ADC_MAX);

/// The raw-count table. The classifier is the only reader.
pub const RAW_THRESHOLDS: RawThresholds = RawThresholds {
    rain: RawAxisThresholds {
        attention: RAIN_ATTENTION_RAW,
        alert: RAIN_ALERT_RAW,
    },
    level: RawAxisThresholds {
        attention: LEVEL_ATTENTION_RAW,
        alert: LEVEL_ALERT_RAW,
    },
};

// =============================================================================
// Percentage Table (display overlay)
// =============================================================================

/// Percentage cutoffs for the display's alert overlay (inclusive).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PercentThresholds {
    pub rain_alert: f32,
    pub level_alert: f32,
}

/// Rainfall percentage at which the overlay reports heavy rain.
pub const RAIN_ALERT_PCT: f32 = 80.0;

/// Water-level percentage at which the overlay reports a high level.
pub const LEVEL_ALERT_PCT: f32 = 70.0;

const _: () = assert!(RAIN_ALERT_PCT > 0.0 && RAIN_ALERT_PCT <= 100.0);
const _: () = assert!(LEVEL_ALERT_PCT > 0.0 && LEVEL_ALERT_PCT <= 100.0);

/// The percentage table. Only the display renderer reads it.
pub const PERCENT_THRESHOLDS: PercentThresholds = PercentThresholds {
    rain_alert: RAIN_ALERT_PCT,
    level_alert: LEVEL_ALERT_PCT,
};

// =============================================================================
// Unit Tests
// =============================================================================
