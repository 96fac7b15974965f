//! Latest-value fan-out from the sampler to every consumer.
//!
//! The sampler is the only writer. Each consumer holds its own [`Subscriber`]
//! and always sees the newest sample; samples published while a consumer is
//! busy are overwritten, never queued. Every published sample carries a
//! sequence number so a consumer can tell how many it skipped.
//!
//! Built on [`embassy_sync::watch::Watch`]; the mutex type is a parameter so
//! host tests can share a bus across threads.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::watch::{Receiver, Sender, Watch};

use crate::sample::SensorSample;

/// Display, indicator, matrix and alarm.
pub const CONSUMER_COUNT: usize = 4;

/// A sample as seen on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Published {
    /// Starts at 1 and increases by one per publish.
    pub seq: u32,
    pub sample: SensorSample,
}

/// Single-writer, multi-reader latest-value slot.
pub struct SampleBus<M: RawMutex = CriticalSectionRawMutex> {
    watch: Watch<M, Published, CONSUMER_COUNT>,
}

impl<M: RawMutex> SampleBus<M> {
    /// Empty bus; usable in a `static`.
    pub const fn new() -> Self { Self { watch: Watch::new() } }

    /// Writer handle. Only one should exist; sequence numbers restart per handle.
    pub fn publisher(&self) -> Publisher<'_, M> {
        Publisher {
            tx: self.watch.sender(),
            seq: 0,
        }
    }

    /// Reader handle, or `None` once [`CONSUMER_COUNT`] readers exist.
    pub fn subscribe(&self) -> Option<Subscriber<'_, M>> {
        self.watch.receiver().map(|rx| Subscriber {
            rx,
            last_seq: None,
            skipped: 0,
        })
    }
}

impl<M: RawMutex> Default for SampleBus<M> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Publisher
// =============================================================================

pub struct Publisher<'a, M: RawMutex> {
    tx: Sender<'a, M, Published, CONSUMER_COUNT>,
    seq: u32,
}

impl<M: RawMutex> Publisher<'_, M> {
    /// Replace the current sample and wake every waiting subscriber.
    ///
    /// Returns the sequence number assigned to `sample`.
    pub fn publish(
        &mut self,
        sample: SensorSample,
    ) -> u32 {
        self.seq = self.seq.wrapping_add(1);
        self.tx.send(Published { seq: self.seq, sample });
        self.seq
    }

    /// Sequence number of the last publish, 0 before the first.
    #[inline]
    pub const fn seq(&self) -> u32 { self.seq }
}

// =============================================================================
// Subscriber
// =============================================================================

pub struct Subscriber<'a, M: RawMutex> {
    rx: Receiver<'a, M, Published, CONSUMER_COUNT>,
    last_seq: Option<u32>,
    skipped: u32,
}

impl<M: RawMutex> Subscriber<'_, M> {
    /// Wait for a sample this subscriber has not seen yet.
    pub async fn next(&mut self) -> Published {
        let published = self.rx.changed().await;
        self.observe(published);
        published
    }

    /// Take an unseen sample if one is available.
    pub fn try_next(&mut self) -> Option<Published> {
        let published = self.rx.try_changed()?;
        self.observe(published);
        Some(published)
    }

    /// Samples published but never observed since the first one this subscriber saw.
    #[inline]
    pub const fn skipped(&self) -> u32 { self.skipped }

    /// Sequence number of the last observed sample.
    #[inline]
    pub const fn last_seq(&self) -> Option<u32> { self.last_seq }

    fn observe(
        &mut self,
        published: Published,
    ) {
        if let Some(last) = self.last_seq {
            let gap = published.seq.wrapping_sub(last).saturating_sub(1);
            self.skipped = self.skipped.saturating_add(gap);
        }
        self.last_seq = Some(published.seq);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::thread;

    use embassy_futures::block_on;

    use super::*;

    #[test]
    fn test_empty_bus_has_nothing() {
        let bus: SampleBus = SampleBus::new();
        let mut sub = bus.subscribe().unwrap();
        assert_eq!(sub.try_next(), None);
        assert_eq!(sub.last_seq(), None);
    }

    #[test]
    fn test_every_subscriber_sees_latest() {
        let bus: SampleBus = SampleBus::new();
        let mut a = bus.subscribe().unwrap();
        let mut b = bus.subscribe().unwrap();
        let mut publisher = bus.publisher();

        publisher.publish(SensorSample::new(1, 1));
        publisher.publish(SensorSample::new(2, 2));
        assert_eq!(publisher.publish(SensorSample::new(4000, 1000)), 3);

        for sub in [&mut a, &mut b] {
            let p = sub.try_next().unwrap();
            assert_eq!(p.seq, 3);
            assert_eq!(p.sample, SensorSample::new(4000, 1000));
            // Already seen
            assert_eq!(sub.try_next(), None);
        }
    }

    #[test]
    fn test_skipped_counts_overwritten_samples() {
        let bus: SampleBus = SampleBus::new();
        let mut sub = bus.subscribe().unwrap();
        let mut publisher = bus.publisher();

        publisher.publish(SensorSample::new(10, 10));
        sub.try_next().unwrap();
        assert_eq!(sub.skipped(), 0);

        for raw in 0..5 {
            publisher.publish(SensorSample::new(raw, raw));
        }
        assert_eq!(sub.try_next().unwrap().seq, 6);
        assert_eq!(sub.skipped(), 4);
        assert_eq!(sub.last_seq(), Some(6));
    }

    #[test]
    fn test_subscriber_slots_are_limited() {
        let bus: SampleBus = SampleBus::new();
        let subs: Vec<_> = (0..CONSUMER_COUNT).map(|_| bus.subscribe()).collect();
        assert!(subs.iter().all(Option::is_some));
        assert!(bus.subscribe().is_none());
    }

    #[test]
    fn test_next_returns_pending_sample() {
        let bus: SampleBus = SampleBus::new();
        let mut sub = bus.subscribe().unwrap();
        let mut publisher = bus.publisher();
        publisher.publish(SensorSample::new(2000, 2000));

        let p = block_on(sub.next());
        assert_eq!(p.seq, 1);
        assert_eq!(p.sample, SensorSample::new(2000, 2000));
    }

    static SHARED: SampleBus = SampleBus::new();

    #[test]
    fn test_concurrent_readers_see_increasing_sequence() {
        const PUBLISHES: u32 = 2000;

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let mut sub = SHARED.subscribe().unwrap();
                thread::spawn(move || {
                    let mut seen = 0u32;
                    let mut first = None;
                    loop {
                        let prev = sub.last_seq();
                        let Some(p) = sub.try_next() else {
                            thread::yield_now();
                            continue;
                        };
                        if let Some(prev) = prev {
                            assert!(p.seq > prev, "sequence went from {prev} to {}", p.seq);
                        }
                        // Both axes always carry the same value in this test
                        assert_eq!(p.sample.rain_raw, p.sample.level_raw);
                        first.get_or_insert(p.seq);
                        seen += 1;
                        if p.seq == PUBLISHES {
                            break;
                        }
                    }
                    (seen, sub.skipped(), first.unwrap_or(0))
                })
            })
            .collect();

        let writer = thread::spawn(|| {
            let mut publisher = SHARED.publisher();
            for i in 1..=PUBLISHES {
                publisher.publish(SensorSample::new(i as u16, i as u16));
                if i % 64 == 0 {
                    thread::yield_now();
                }
            }
        });
        writer.join().unwrap();

        for reader in readers {
            let (seen, skipped, first) = reader.join().unwrap();
            assert_eq!(seen + skipped, PUBLISHES - first + 1);
        }
    }
}
