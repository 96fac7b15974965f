//! Audible alarm patterns and square-wave tone timing.
//!
//! - **Alert**: eight short 2.5 kHz pulses
//! - **Attention**: a three-tone rising sweep (100/200/300 Hz), played three times
//! - **Normal**: silence
//!
//! Tones are generated by the PWM peripheral at 50 % duty. With a fixed clock
//! divider the counter top is `clk_sys / (divider * freq)`.

use crate::severity::Severity;

/// PWM clock divider used for every tone.
pub const TONE_PWM_DIVIDER: u8 = 125;

/// How long the Normal pattern keeps the transducer silent.
pub const ALARM_SILENCE_MS: u32 = 100;

const PULSE_FREQ_HZ: u32 = 2500;
const PULSE_MS: u32 = 80;
const PULSE_GAP_MS: u32 = 50;
const PULSE_COUNT: usize = 8;

const SWEEP_FREQS_HZ: [u32; 3] = [100, 200, 300];
const SWEEP_TONE_MS: u32 = 200;
const SWEEP_REPEATS: usize = 3;

/// One tone: play `freq_hz` for `duration_ms`, then stay silent for `gap_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub freq_hz: u32,
    pub duration_ms: u32,
    pub gap_ms: u32,
}

impl Tone {
    pub const fn new(
        freq_hz: u32,
        duration_ms: u32,
        gap_ms: u32,
    ) -> Self {
        Self {
            freq_hz,
            duration_ms,
            gap_ms,
        }
    }
}

/// Alarm pattern selected from the combined severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmPattern {
    /// Eight short high-pitched pulses.
    Pulses,
    /// Three repetitions of the ascending sweep.
    Sweep,
    #[default]
    Silence,
}

impl AlarmPattern {
    pub const fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Alert => Self::Pulses,
            Severity::Attention => Self::Sweep,
            Severity::Normal => Self::Silence,
        }
    }

    /// Number of tones in the pattern.
    pub const fn tone_count(self) -> usize {
        match self {
            Self::Pulses => PULSE_COUNT,
            Self::Sweep => SWEEP_FREQS_HZ.len() * SWEEP_REPEATS,
            Self::Silence => 0,
        }
    }

    /// Tone at `index`, or `None` past the end of the pattern.
    pub const fn tone(
        self,
        index: usize,
    ) -> Option<Tone> {
        if index >= self.tone_count() {
            return None;
        }
        match self {
            Self::Pulses => Some(Tone::new(PULSE_FREQ_HZ, PULSE_MS, PULSE_GAP_MS)),
            Self::Sweep => Some(Tone::new(
                SWEEP_FREQS_HZ[index % SWEEP_FREQS_HZ.len()],
                SWEEP_TONE_MS,
                0,
            )),
            Self::Silence => None,
        }
    }

    /// Iterate the tones in playback order.
    pub fn tones(self) -> impl Iterator<Item = Tone> {
        (0..self.tone_count()).filter_map(move |i| self.tone(i))
    }

    /// Total playback time including gaps (or the silence hold).
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Silence => ALARM_SILENCE_MS,
            _ => self.tones().map(|t| t.duration_ms + t.gap_ms).sum(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pulses => "PULSES",
            Self::Sweep => "SWEEP",
            Self::Silence => "SILENT",
        }
    }
}

// =============================================================================
// Square-Wave Timing
// =============================================================================

/// PWM settings producing a 50 % square wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SquareWave {
    pub divider: u8,
    pub top: u16,
    pub compare: u16,
}

impl SquareWave {
    /// Compute counter top and compare for `freq_hz` given the system clock.
    ///
    /// The top saturates at `u16::MAX` for frequencies the divider cannot reach;
    /// a zero frequency yields a silent (compare 0) setting.
    pub fn for_frequency(
        freq_hz: u32,
        clk_sys_hz: u32,
    ) -> Self {
        if freq_hz == 0 {
            return Self {
                divider: TONE_PWM_DIVIDER,
                top: u16::MAX,
                compare: 0,
            };
        }
        let ticks = clk_sys_hz / (u32::from(TONE_PWM_DIVIDER) * freq_hz);
        let top = ticks.min(u32::from(u16::MAX)) as u16;
        Self {
            divider: TONE_PWM_DIVIDER,
            top,
            compare: top / 2,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
