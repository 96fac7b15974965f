//! 5x5 LED matrix patterns and the animator state machine.
//!
//! During Alert the matrix cycles through three "drop" patterns, each in its own
//! colour; in every other state it shows the dark pattern. The animator owns the
//! pattern currently on the matrix and hands out one [`Cycle`] per sample:
//!
//! ```text
//! Alert:            DropsA/red 500ms -> DropsB/green 500ms -> DropsC/blue 500ms
//! Attention/Normal: Dark 1000ms
//! ```
//!
//! A cycle takes longer than the sampling period, so the matrix deliberately
//! refreshes slower than samples arrive.

use crate::severity::Severity;

/// Number of pixels on the matrix.
pub const MATRIX_PIXELS: usize = 25;

/// Dwell per pattern while alerting.
pub const MATRIX_ALERT_DWELL_MS: u32 = 500;

/// Dwell of the dark pattern outside Alert.
pub const MATRIX_IDLE_DWELL_MS: u32 = 1000;

/// One matrix frame, in strip order.
pub type MatrixFrame = [Rgbw; MATRIX_PIXELS];

// =============================================================================
// Colour
// =============================================================================

/// 8-bit RGBW pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const OFF: Self = Self::new(0, 0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0, 0);
    pub const BLUE: Self = Self::new(0, 0, 255, 0);

    pub const fn new(
        r: u8,
        g: u8,
        b: u8,
        w: u8,
    ) -> Self {
        Self { r, g, b, w }
    }

    /// Pack as `r << 24 | g << 16 | b << 8 | w`, the word layout the strip expects.
    #[inline]
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.w as u32
    }

    #[inline]
    pub const fn is_off(self) -> bool { self.packed() == 0 }
}

// =============================================================================
// Patterns
// =============================================================================

/// The four matrix patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    DropsA,
    DropsB,
    DropsC,
    #[default]
    Dark,
}

impl Pattern {
    /// Lit pixels as a bitmask, bit `i` = strip index `i`.
    pub const fn mask(self) -> u32 {
        match self {
            Self::DropsA => (1 << 4) | (1 << 14) | (1 << 15) | (1 << 24),
            Self::DropsB => (1 << 2) | (1 << 12) | (1 << 17) | (1 << 22),
            Self::DropsC => (1 << 0) | (1 << 10) | (1 << 19) | (1 << 20),
            Self::Dark => 0,
        }
    }

    #[inline]
    pub const fn is_lit(
        self,
        index: usize,
    ) -> bool {
        index < MATRIX_PIXELS && self.mask() & (1 << index) != 0
    }

    /// Render the pattern with `color` on lit pixels and [`Rgbw::OFF`] elsewhere.
    pub fn render(
        self,
        color: Rgbw,
    ) -> MatrixFrame {
        let mut frame = [Rgbw::OFF; MATRIX_PIXELS];
        for (i, px) in frame.iter_mut().enumerate() {
            if self.is_lit(i) {
                *px = color;
            }
        }
        frame
    }
}

// =============================================================================
// Animator
// =============================================================================

/// One step of a cycle: what to show and for how long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixStep {
    pub pattern: Pattern,
    pub color: Rgbw,
    pub dwell_ms: u32,
}

impl MatrixStep {
    #[inline]
    pub fn frame(&self) -> MatrixFrame { self.pattern.render(self.color) }
}

const ALERT_SEQUENCE: [MatrixStep; 3] = [
    MatrixStep {
        pattern: Pattern::DropsA,
        color: Rgbw::RED,
        dwell_ms: MATRIX_ALERT_DWELL_MS,
    },
    MatrixStep {
        pattern: Pattern::DropsB,
        color: Rgbw::GREEN,
        dwell_ms: MATRIX_ALERT_DWELL_MS,
    },
    MatrixStep {
        pattern: Pattern::DropsC,
        color: Rgbw::BLUE,
        dwell_ms: MATRIX_ALERT_DWELL_MS,
    },
];

const IDLE_SEQUENCE: [MatrixStep; 1] = [MatrixStep {
    pattern: Pattern::Dark,
    color: Rgbw::OFF,
    dwell_ms: MATRIX_IDLE_DWELL_MS,
}];

/// Matrix animation state. Owns the pattern currently displayed.
#[derive(Debug, Default)]
pub struct MatrixAnimator {
    current: Pattern,
}

impl MatrixAnimator {
    /// Start dark.
    pub const fn new() -> Self { Self { current: Pattern::Dark } }

    /// Pattern most recently handed out by a cycle.
    #[inline]
    pub const fn current(&self) -> Pattern { self.current }

    /// Steps to play for one sample of the given combined severity.
    ///
    /// The animator's current pattern advances as the returned iterator is consumed.
    pub fn cycle(
        &mut self,
        severity: Severity,
    ) -> Cycle<'_> {
        let steps: &'static [MatrixStep] = match severity {
            Severity::Alert => &ALERT_SEQUENCE,
            Severity::Attention | Severity::Normal => &IDLE_SEQUENCE,
        };
        Cycle {
            animator: self,
            steps,
            next: 0,
        }
    }
}

/// Iterator over the steps of one animation cycle.
pub struct Cycle<'a> {
    animator: &'a mut MatrixAnimator,
    steps: &'static [MatrixStep],
    next: usize,
}

impl Cycle<'_> {
    /// Total time the cycle holds the matrix, in milliseconds.
    pub fn duration_ms(&self) -> u32 { self.steps.iter().map(|s| s.dwell_ms).sum() }
}

impl Iterator for Cycle<'_> {
    type Item = MatrixStep;

    fn next(&mut self) -> Option<Self::Item> {
        let step = *self.steps.get(self.next)?;
        self.next += 1;
        self.animator.current = step.pattern;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cycle<'_> {}

// =============================================================================
// Unit Tests
// =============================================================================
