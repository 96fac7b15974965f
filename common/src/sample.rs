//! Sensor samples, normalization and segment quantization.
//!
//! A [`SensorSample`] holds raw ADC counts exactly as read. Consumers that need a
//! percentage call [`SensorSample::normalize`]; the display then clamps and
//! quantizes each axis with [`QuantizedPercent::from_percent`].

use crate::thresholds::NORMALIZE_FULL_SCALE;

/// Number of segments in one bar graph (one per 10 %).
pub const BAR_SEGMENTS: u8 = 10;

/// Candidate values for quantization, scanned in ascending order.
const QUANT_CANDIDATES: [u8; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// One reading of both analog channels, in raw ADC counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    /// Rainfall proxy (ADC1).
    pub rain_raw: u16,
    /// Water-level proxy (ADC0).
    pub level_raw: u16,
}

impl SensorSample {
    pub const fn new(
        rain_raw: u16,
        level_raw: u16,
    ) -> Self {
        Self { rain_raw, level_raw }
    }

    /// Convert both axes to percent using the inherited `/ 4088` scale.
    ///
    /// The result is not clamped; full scale maps slightly above 100.
    pub fn normalize(&self) -> NormalizedSample {
        NormalizedSample {
            rain_pct: raw_to_percent(self.rain_raw),
            level_pct: raw_to_percent(self.level_raw),
        }
    }
}

/// Convert a raw count to percent of [`NORMALIZE_FULL_SCALE`].
#[inline]
pub fn raw_to_percent(raw: u16) -> f32 { f32::from(raw) * 100.0 / NORMALIZE_FULL_SCALE }

/// Both axes in percent, unclamped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NormalizedSample {
    pub rain_pct: f32,
    pub level_pct: f32,
}

/// Clamp a percentage into `[0, 100]`. Non-finite input becomes 0.
#[inline]
pub fn clamp_percent(pct: f32) -> f32 {
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// A percentage rounded to the nearest multiple of ten, used for bar segments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuantizedPercent(u8);

impl QuantizedPercent {
    /// Clamp `pct` to `[0, 100]` and snap it to the nearest multiple of ten.
    ///
    /// Candidates are scanned upward and only a strictly smaller distance
    /// replaces the current best, so exact midpoints resolve to the lower value
    /// (`5.0 -> 0`, `15.0 -> 10`).
    pub fn from_percent(pct: f32) -> Self {
        let value = clamp_percent(pct);

        let mut best = QUANT_CANDIDATES[0];
        let mut best_err = f32::MAX;
        for candidate in QUANT_CANDIDATES {
            let c = f32::from(candidate);
            let err = if value > c { value - c } else { c - value };
            if err < best_err {
                best_err = err;
                best = candidate;
            }
        }
        Self(best)
    }

    /// Quantized value in percent (0, 10, ..., 100).
    #[inline]
    pub const fn percent(self) -> u8 { self.0 }

    /// Number of bar segments to fill (0..=10).
    #[inline]
    pub const fn filled_segments(self) -> u8 { self.0 / 10 }
}

/// Shorthand for [`QuantizedPercent::from_percent`] returning the plain value.
#[inline]
pub fn quantize(pct: f32) -> u8 { QuantizedPercent::from_percent(pct).percent() }

// =============================================================================
// Unit Tests
// =============================================================================
