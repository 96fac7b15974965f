//! Audible alarm. Playback occupies only this consumer's task.

use embedded_hal_async::delay::DelayNs;
use rainwatch_common::alarm::{ALARM_SILENCE_MS, AlarmPattern, SquareWave};
use rainwatch_common::bus::Published;
use rainwatch_common::classify;

use super::{Consumer, SeverityTracker};
use crate::hal::ToneOutput;

pub struct AlarmConsumer<T> {
    tone: T,
    clk_sys_hz: u32,
    tracker: SeverityTracker,
}

impl<T: ToneOutput> AlarmConsumer<T> {
    /// `clk_sys_hz` is the PWM input clock used to derive tone periods.
    pub fn new(
        tone: T,
        clk_sys_hz: u32,
    ) -> Self {
        Self {
            tone,
            clk_sys_hz,
            tracker: SeverityTracker::default(),
        }
    }

    /// Play `pattern` to completion.
    pub async fn play<D: DelayNs>(
        &mut self,
        pattern: AlarmPattern,
        delay: &mut D,
    ) {
        if pattern == AlarmPattern::Silence {
            self.tone.stop();
            delay.delay_ms(ALARM_SILENCE_MS).await;
            return;
        }

        for tone in pattern.tones() {
            self.tone.start(SquareWave::for_frequency(tone.freq_hz, self.clk_sys_hz));
            delay.delay_ms(tone.duration_ms).await;
            self.tone.stop();
            if tone.gap_ms > 0 {
                delay.delay_ms(tone.gap_ms).await;
            }
        }
    }

    #[inline]
    pub fn output(&self) -> &T { &self.tone }
}

impl<T: ToneOutput> Consumer for AlarmConsumer<T> {
    const NAME: &'static str = "alarm";

    async fn handle<D: DelayNs>(
        &mut self,
        published: Published,
        delay: &mut D,
    ) {
        let severity = classify(published.sample).combined;
        let pattern = AlarmPattern::for_severity(severity);
        if self.tracker.update(Self::NAME, severity) {
            log_info!("alarm: pattern {}", pattern.label());
        }
        self.play(pattern, delay).await;
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use rainwatch_common::SensorSample;

    use super::*;
    use crate::fakes::{FakeTone, RecordingDelay, ToneEvent};

    const CLK_SYS: u32 = 125_000_000;

    fn run_for(sample: SensorSample) -> (FakeTone, RecordingDelay) {
        let mut alarm = AlarmConsumer::new(FakeTone::default(), CLK_SYS);
        let mut delay = RecordingDelay::default();
        block_on(alarm.handle(Published { seq: 1, sample }, &mut delay));
        (alarm.tone, delay)
    }

    #[test]
    fn test_rain_alert_plays_eight_pulses() {
        let (tone, delay) = run_for(SensorSample::new(4000, 1000));
        let started = tone.started();
        assert_eq!(started.len(), 8);
        assert!(started.iter().all(|w| w.top == 400 && w.compare == 200));
        assert_eq!(delay.delays_ms, [80u32, 50].repeat(8));
        assert_eq!(tone.events.last(), Some(&ToneEvent::Stop));
    }

    #[test]
    fn test_attention_plays_sweep_three_times() {
        let (tone, delay) = run_for(SensorSample::new(2000, 2000));
        let tops: Vec<u16> = tone.started().iter().map(|w| w.top).collect();
        assert_eq!(tops, [10_000u16, 5_000, 3_333].repeat(3));
        assert_eq!(delay.delays_ms, vec![200u32; 9]);
    }

    #[test]
    fn test_normal_is_silent() {
        let (tone, delay) = run_for(SensorSample::new(0, 0));
        assert_eq!(tone.events, vec![ToneEvent::Stop]);
        assert_eq!(delay.delays_ms, vec![ALARM_SILENCE_MS]);
    }

    #[test]
    fn test_every_tone_is_stopped() {
        let (tone, _) = run_for(SensorSample::new(2000, 2000));
        let starts = tone.events.iter().filter(|e| matches!(e, ToneEvent::Start(_))).count();
        let stops = tone.events.iter().filter(|e| **e == ToneEvent::Stop).count();
        assert_eq!(starts, stops);
    }

    #[test]
    fn test_playback_lasts_pattern_duration() {
        for sample in [SensorSample::new(4000, 0), SensorSample::new(2000, 0), SensorSample::new(0, 0)] {
            let pattern = AlarmPattern::for_severity(classify(sample).combined);
            let (_, delay) = run_for(sample);
            assert_eq!(delay.total_ms(), pattern.duration_ms());
        }
    }
}
