//! The four sample consumers and the loop that drives them.
//!
//! - `display`: Bar graphs and alert overlays on the OLED panel
//! - `indicator`: Red/green status LED brightness
//! - `matrix`: 5x5 LED matrix animation
//! - `alarm`: Audible alarm patterns
//!
//! Each consumer runs in its own task: wait for a sample newer than the last
//! one it saw, handle it (possibly dwelling for seconds), settle for
//! [`CONSUMER_SETTLE_MS`], repeat. A slow consumer only ever sees the newest
//! sample; it never delays the sampler or the other consumers.

mod alarm;
mod display;
mod indicator;
mod matrix;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use rainwatch_common::Severity;
use rainwatch_common::bus::{Published, Subscriber};

use crate::config::CONSUMER_SETTLE_MS;

pub use alarm::AlarmConsumer;
pub use display::DisplayConsumer;
pub use indicator::IndicatorConsumer;
pub use matrix::MatrixConsumer;

/// A task that reacts to every sample it observes.
pub trait Consumer {
    /// Short name used in log lines.
    const NAME: &'static str;

    async fn handle<D: DelayNs>(
        &mut self,
        published: Published,
        delay: &mut D,
    );
}

/// Wait for the next sample, handle it and settle.
///
/// Returns the sample that was handled.
pub async fn step<C, M, D>(
    consumer: &mut C,
    subscriber: &mut Subscriber<'_, M>,
    delay: &mut D,
) -> Published
where
    C: Consumer,
    M: RawMutex,
    D: DelayNs,
{
    let skipped_before = subscriber.skipped();
    let published = subscriber.next().await;
    let skipped = subscriber.skipped() - skipped_before;
    if skipped > 0 {
        log_debug!("{}: skipped {} samples before #{}", C::NAME, skipped, published.seq);
    }

    consumer.handle(published, delay).await;
    delay.delay_ms(CONSUMER_SETTLE_MS).await;
    published
}

/// Drive a consumer forever.
pub async fn run<C, M, D>(
    consumer: &mut C,
    mut subscriber: Subscriber<'_, M>,
    mut delay: D,
) -> !
where
    C: Consumer,
    M: RawMutex,
    D: DelayNs,
{
    log_info!("{} consumer started", C::NAME);
    loop {
        step(consumer, &mut subscriber, &mut delay).await;
    }
}

/// Remembers the last combined severity a consumer acted on, for transition logs.
#[derive(Debug, Default)]
pub(crate) struct SeverityTracker {
    last: Option<Severity>,
}

impl SeverityTracker {
    /// Record `severity`; logs and returns `true` when it differs from the previous one.
    pub(crate) fn update(
        &mut self,
        name: &'static str,
        severity: Severity,
    ) -> bool {
        let changed = self.last != Some(severity);
        if changed {
            match self.last {
                Some(previous) => log_info!("{}: {} -> {}", name, previous.label(), severity.label()),
                None => log_info!("{}: {}", name, severity.label()),
            }
        }
        self.last = Some(severity);
        changed
    }

    pub(crate) const fn last(&self) -> Option<Severity> { self.last }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use rainwatch_common::SensorSample;
    use rainwatch_common::bus::SampleBus;

    use super::*;
    use crate::fakes::RecordingDelay;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<u32>,
    }

    impl Consumer for Recorder {
        const NAME: &'static str = "recorder";

        async fn handle<D: DelayNs>(
            &mut self,
            published: Published,
            delay: &mut D,
        ) {
            self.seen.push(published.seq);
            delay.delay_ms(7).await;
        }
    }

    #[test]
    fn test_step_handles_then_settles() {
        let bus: SampleBus<NoopRawMutex> = SampleBus::new();
        let mut sub = bus.subscribe().unwrap();
        let mut publisher = bus.publisher();
        let mut recorder = Recorder::default();
        let mut delay = RecordingDelay::default();

        publisher.publish(SensorSample::new(1, 2));
        let handled = block_on(step(&mut recorder, &mut sub, &mut delay));

        assert_eq!(handled.seq, 1);
        assert_eq!(recorder.seen, vec![1]);
        assert_eq!(delay.delays_ms, vec![7, CONSUMER_SETTLE_MS]);
    }

    #[test]
    fn test_step_takes_newest_sample() {
        let bus: SampleBus<NoopRawMutex> = SampleBus::new();
        let mut sub = bus.subscribe().unwrap();
        let mut publisher = bus.publisher();
        let mut recorder = Recorder::default();
        let mut delay = RecordingDelay::default();

        for raw in 0..4 {
            publisher.publish(SensorSample::new(raw, raw));
        }
        let handled = block_on(step(&mut recorder, &mut sub, &mut delay));
        assert_eq!(handled.sample, SensorSample::new(3, 3));

        publisher.publish(SensorSample::new(9, 9));
        block_on(step(&mut recorder, &mut sub, &mut delay));
        assert_eq!(recorder.seen, vec![4, 5]);
        assert_eq!(sub.skipped(), 0);
    }

    #[test]
    fn test_tracker_reports_transitions_only() {
        let mut tracker = SeverityTracker::default();
        assert!(tracker.update("t", Severity::Normal));
        assert!(!tracker.update("t", Severity::Normal));
        assert!(tracker.update("t", Severity::Alert));
        assert_eq!(tracker.last(), Some(Severity::Alert));
    }
}
