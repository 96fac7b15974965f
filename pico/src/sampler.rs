//! Sample source: reads both analog channels into a [`SensorSample`].
//!
//! The firmware calls [`Sampler::sample`] from a 10 Hz ticker and publishes the
//! result on the sample bus. A failed conversion keeps the channel's previous
//! good reading so the pipeline never sees a fault.

use rainwatch_common::SensorSample;

use crate::hal::{AnalogInput, SensorChannel};

pub struct Sampler<A> {
    adc: A,
    last: SensorSample,
    faults: u32,
}

impl<A: AnalogInput> Sampler<A> {
    /// Both channels read as 0 until the first good conversion.
    pub fn new(adc: A) -> Self {
        Self {
            adc,
            last: SensorSample::default(),
            faults: 0,
        }
    }

    /// Read water level (ADC0) then rainfall (ADC1).
    pub async fn sample(&mut self) -> SensorSample {
        let level_raw = self.read_or_hold(SensorChannel::Level, self.last.level_raw).await;
        let rain_raw = self.read_or_hold(SensorChannel::Rain, self.last.rain_raw).await;
        self.last = SensorSample::new(rain_raw, level_raw);
        self.last
    }

    /// Most recent sample returned by [`Self::sample`].
    #[inline]
    pub const fn last(&self) -> SensorSample { self.last }

    /// Failed conversions since start-up.
    #[inline]
    pub const fn faults(&self) -> u32 { self.faults }

    async fn read_or_hold(
        &mut self,
        channel: SensorChannel,
        previous: u16,
    ) -> u16 {
        match self.adc.read_channel(channel).await {
            Ok(raw) => raw,
            Err(_) => {
                self.faults = self.faults.saturating_add(1);
                log_warn!(
                    "ADC read failed on {} (GPIO{}), holding {}",
                    channel.label(),
                    channel.gpio(),
                    previous
                );
                previous
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
