//! Frame-driven versions of the four firmware consumers.
//!
//! The firmware's consumers block in `delay_ms` while an overlay, animation
//! step or alarm pattern plays. The simulator has one thread, so each stage is
//! polled once per frame instead and keeps a deadline for whatever it is
//! currently holding. A stage only takes a new sample from the bus once its
//! deadline has passed, which gives the same latest-value behaviour.

use std::time::{Duration, Instant};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use rainwatch_common::alarm::AlarmPattern;
use rainwatch_common::bus::Subscriber;
use rainwatch_common::indicator::IndicatorLevels;
use rainwatch_common::matrix::{MATRIX_PIXELS, MatrixAnimator, MatrixFrame, MatrixStep, Rgbw};
use rainwatch_common::render::{
    AlertOverlay,
    DashboardView,
    OVERLAY_DWELL_MS,
    OVERLAY_LEAD_MS,
    draw_alert_overlay,
    draw_dashboard,
};
use rainwatch_common::{Severity, classify};

use crate::timing::{CONSUMER_SETTLE, millis};

pub type SimSubscriber<'a> = Subscriber<'a, NoopRawMutex>;

// =============================================================================
// Display
// =============================================================================

#[derive(Clone, Copy, Debug)]
enum DisplayPhase {
    /// Ready for the next sample once `until` passes.
    Ready { until: Instant },
    /// Dashboard shown; overlay follows at `until`.
    Lead { overlay: AlertOverlay, until: Instant },
    /// Overlay shown until `until`.
    Overlay { until: Instant },
}

/// OLED dashboard with the alert overlay sequence.
pub struct DisplayStage {
    phase: DisplayPhase,
    view: Option<DashboardView>,
}

impl DisplayStage {
    pub fn new(now: Instant) -> Self {
        Self {
            phase: DisplayPhase::Ready { until: now },
            view: None,
        }
    }

    /// Advance the stage; draws to `panel` only when the picture changes.
    pub fn poll<D>(
        &mut self,
        now: Instant,
        subscriber: &mut SimSubscriber<'_>,
        panel: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self.phase {
            DisplayPhase::Lead { overlay, until } if now >= until => {
                draw_alert_overlay(panel, overlay);
                self.phase = DisplayPhase::Overlay {
                    until: now + millis(OVERLAY_DWELL_MS),
                };
            }
            DisplayPhase::Overlay { until } if now >= until => {
                self.phase = DisplayPhase::Ready {
                    until: now + CONSUMER_SETTLE,
                };
            }
            DisplayPhase::Ready { until } if now >= until => {
                let Some(published) = subscriber.try_next() else {
                    return;
                };
                let view = DashboardView::from_sample(published.sample);
                draw_dashboard(panel, &view);
                self.phase = match view.overlay {
                    Some(overlay) => DisplayPhase::Lead {
                        overlay,
                        until: now + millis(OVERLAY_LEAD_MS),
                    },
                    None => DisplayPhase::Ready {
                        until: now + CONSUMER_SETTLE,
                    },
                };
                self.view = Some(view);
            }
            _ => {}
        }
    }

    /// Quantized percentages of the sample currently on the dashboard.
    pub fn percentages(&self) -> Option<(u8, u8)> {
        self.view
            .as_ref()
            .map(|v| (v.rain.quantized.percent(), v.level.quantized.percent()))
    }
}

// =============================================================================
// Indicator
// =============================================================================

/// Red/green LED pair; reacts immediately.
#[derive(Default)]
pub struct IndicatorStage {
    levels: IndicatorLevels,
    severity: Severity,
    until: Option<Instant>,
}

impl IndicatorStage {
    pub fn poll(
        &mut self,
        now: Instant,
        subscriber: &mut SimSubscriber<'_>,
    ) {
        if self.until.is_some_and(|until| now < until) {
            return;
        }
        if let Some(published) = subscriber.try_next() {
            self.severity = classify(published.sample).combined;
            self.levels = IndicatorLevels::from_severity(self.severity);
            self.until = Some(now + CONSUMER_SETTLE);
        }
    }

    #[inline]
    pub const fn levels(&self) -> IndicatorLevels { self.levels }

    #[inline]
    pub const fn severity(&self) -> Severity { self.severity }
}

// =============================================================================
// Matrix
// =============================================================================

/// 5x5 matrix preview stepping through the animator's cycles.
pub struct MatrixStage {
    animator: MatrixAnimator,
    pending: Vec<MatrixStep>,
    frame: MatrixFrame,
    until: Instant,
}

impl MatrixStage {
    pub fn new(now: Instant) -> Self {
        Self {
            animator: MatrixAnimator::new(),
            pending: Vec::new(),
            frame: [Rgbw::OFF; MATRIX_PIXELS],
            until: now,
        }
    }

    pub fn poll(
        &mut self,
        now: Instant,
        subscriber: &mut SimSubscriber<'_>,
    ) {
        if now < self.until {
            return;
        }
        if self.pending.is_empty() {
            let Some(published) = subscriber.try_next() else {
                return;
            };
            let severity = classify(published.sample).combined;
            // Reversed so `pop` yields steps in order
            self.pending = self.animator.cycle(severity).collect();
            self.pending.reverse();
        }
        if let Some(step) = self.pending.pop() {
            self.frame = step.frame();
            let mut hold = millis(step.dwell_ms);
            if self.pending.is_empty() {
                hold += CONSUMER_SETTLE;
            }
            self.until = now + hold;
        }
    }

    #[inline]
    pub const fn frame(&self) -> &MatrixFrame { &self.frame }
}

// =============================================================================
// Alarm
// =============================================================================

/// Audible alarm; the simulator shows the pattern instead of playing it.
pub struct AlarmStage {
    playing: AlarmPattern,
    until: Instant,
}

impl AlarmStage {
    pub fn new(now: Instant) -> Self {
        Self {
            playing: AlarmPattern::Silence,
            until: now,
        }
    }

    pub fn poll(
        &mut self,
        now: Instant,
        subscriber: &mut SimSubscriber<'_>,
    ) {
        if now < self.until {
            return;
        }
        match subscriber.try_next() {
            Some(published) => {
                self.playing = AlarmPattern::for_severity(classify(published.sample).combined);
                self.until = now + millis(self.playing.duration_ms()) + CONSUMER_SETTLE;
            }
            None => self.playing = AlarmPattern::Silence,
        }
    }

    #[inline]
    pub const fn playing(&self) -> AlarmPattern { self.playing }

    /// Time left in the current pattern.
    pub fn remaining(
        &self,
        now: Instant,
    ) -> Duration {
        self.until.saturating_duration_since(now)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
