//! Bicolor status indicator driven from the combined severity.

use embedded_hal_async::delay::DelayNs;
use rainwatch_common::bus::Published;
use rainwatch_common::indicator::IndicatorLevels;
use rainwatch_common::{Severity, classify};

use super::{Consumer, SeverityTracker};
use crate::hal::{DutyOutput, IndicatorChannel};

pub struct IndicatorConsumer<O> {
    output: O,
    tracker: SeverityTracker,
}

impl<O: DutyOutput> IndicatorConsumer<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            tracker: SeverityTracker::default(),
        }
    }

    /// Apply the brightness pair for `severity`.
    pub fn apply(
        &mut self,
        severity: Severity,
    ) -> IndicatorLevels {
        let levels = IndicatorLevels::from_severity(severity);
        self.output.set_duty(IndicatorChannel::Red, levels.red);
        self.output.set_duty(IndicatorChannel::Green, levels.green);
        self.tracker.update(Self::NAME, severity);
        levels
    }

    /// Severity currently shown, `None` before the first sample.
    #[inline]
    pub const fn severity(&self) -> Option<Severity> { self.tracker.last() }

    #[inline]
    pub fn output(&self) -> &O { &self.output }
}

impl<O: DutyOutput> Consumer for IndicatorConsumer<O> {
    const NAME: &'static str = "indicator";

    async fn handle<D: DelayNs>(
        &mut self,
        published: Published,
        _delay: &mut D,
    ) {
        self.apply(classify(published.sample).combined);
    }
}
