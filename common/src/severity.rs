//! Severity levels and the raw-count classifier.
//!
//! [`classify`] is the single place where the raw-count table is applied. The
//! indicator, LED matrix and alarm drivers all call it on every sample they
//! observe, so they agree by construction without sharing any state.

use crate::sample::SensorSample;
use crate::thresholds::{RAW_THRESHOLDS, RawAxisThresholds};

/// Ordered severity of one axis or of the whole system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    #[default]
    Normal,
    Attention,
    Alert,
}

impl Severity {
    /// Classify one axis against its raw-count cutoffs.
    ///
    /// The alert cutoff value itself is Attention, which keeps the mapping
    /// monotonic over the whole `u16` range.
    pub const fn from_raw(
        raw: u16,
        thresholds: RawAxisThresholds,
    ) -> Self {
        if raw > thresholds.alert {
            Self::Alert
        } else if raw > thresholds.attention {
            Self::Attention
        } else {
            Self::Normal
        }
    }

    /// Short uppercase label for logs and the simulator status line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Attention => "ATTENTION",
            Self::Alert => "ALERT",
        }
    }
}

/// Per-axis severities plus the combined system severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Classification {
    pub rain: Severity,
    pub level: Severity,
    /// `max(rain, level)`; drives the single-output actuators.
    pub combined: Severity,
}

/// Classify a sample against [`RAW_THRESHOLDS`].
///
/// Total and pure: every `u16` pair yields a result.
pub fn classify(sample: SensorSample) -> Classification {
    let rain = Severity::from_raw(sample.rain_raw, RAW_THRESHOLDS.rain);
    let level = Severity::from_raw(sample.level_raw, RAW_THRESHOLDS.level);
    Classification {
        rain,
        level,
        combined: if rain > level { rain } else { level },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
