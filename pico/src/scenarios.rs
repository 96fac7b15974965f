//! End-to-end runs: one published sample through the bus to all four consumers.

use embassy_futures::block_on;
use embedded_graphics::prelude::Point;
use rainwatch_common::SensorSample;
use rainwatch_common::alarm::SquareWave;
use rainwatch_common::bus::{CONSUMER_COUNT, SampleBus};
use rainwatch_common::indicator::{INDICATOR_FULL, INDICATOR_OFF};
use rainwatch_common::layout::{LEVEL_BAR_X, RAIN_BAR_X, segment_origin};
use rainwatch_common::matrix::Pattern;
use rainwatch_common::render::AlertOverlay;
use rainwatch_common::sample::BAR_SEGMENTS;

use crate::consumers::step;
use crate::fakes::{FakeAdc, FakeDuty, FakePanel, FakeStrip, FakeTone, RecordingDelay};
use crate::{AlarmConsumer, DisplayConsumer, IndicatorConsumer, MatrixConsumer, Sampler};

const CLK_SYS: u32 = 125_000_000;

struct Rig {
    display: DisplayConsumer<FakePanel>,
    indicator: IndicatorConsumer<FakeDuty>,
    matrix: MatrixConsumer<FakeStrip>,
    alarm: AlarmConsumer<FakeTone>,
}

impl Rig {
    fn new() -> Self {
        Self {
            display: DisplayConsumer::new(FakePanel::default()),
            indicator: IndicatorConsumer::new(FakeDuty::default()),
            matrix: MatrixConsumer::new(FakeStrip::default()),
            alarm: AlarmConsumer::new(FakeTone::default(), CLK_SYS),
        }
    }

    /// Sample the fake ADC once, publish, and let every consumer take one step.
    fn run(
        &mut self,
        rain_raw: u16,
        level_raw: u16,
    ) {
        // Same critical-section bus type as the firmware's static
        let bus: SampleBus = SampleBus::new();
        let mut subs: Vec<_> = (0..CONSUMER_COUNT).filter_map(|_| bus.subscribe()).collect();
        assert_eq!(subs.len(), CONSUMER_COUNT);

        let mut adc = FakeAdc::default();
        adc.push(Ok(rain_raw), Ok(level_raw));
        let mut sampler = Sampler::new(adc);
        let mut publisher = bus.publisher();
        publisher.publish(block_on(sampler.sample()));

        let mut delay = RecordingDelay::default();
        block_on(async {
            let p = step(&mut self.display, &mut subs[0], &mut delay).await;
            assert_eq!(p.sample, SensorSample::new(rain_raw, level_raw));
            step(&mut self.indicator, &mut subs[1], &mut delay).await;
            step(&mut self.matrix, &mut subs[2], &mut delay).await;
            step(&mut self.alarm, &mut subs[3], &mut delay).await;
        });
    }

    fn indicator(&self) -> (u16, u16) {
        let out = self.indicator.output();
        (out.red, out.green)
    }
}

#[test]
fn test_rain_alert() {
    let mut rig = Rig::new();
    rig.run(4000, 1000);

    assert_eq!(rig.indicator(), (INDICATOR_FULL, INDICATOR_OFF));
    assert_eq!(rig.matrix.pattern(), Pattern::DropsC);
    let pulses = rig.alarm.output().started();
    assert_eq!(pulses.len(), 8);
    assert!(pulses.iter().all(|w| *w == SquareWave::for_frequency(2500, CLK_SYS)));
    assert_eq!(rig.display.overlay(), Some(AlertOverlay::RainOnly));
}

#[test]
fn test_both_attention() {
    let mut rig = Rig::new();
    rig.run(2000, 2000);

    assert_eq!(rig.indicator(), (INDICATOR_FULL, INDICATOR_FULL));
    assert_eq!(rig.matrix.pattern(), Pattern::Dark);
    let freqs: Vec<SquareWave> = rig.alarm.output().started();
    assert_eq!(freqs.len(), 9);
    assert_eq!(freqs[0], SquareWave::for_frequency(100, CLK_SYS));
    assert_eq!(freqs[8], SquareWave::for_frequency(300, CLK_SYS));
    // 48.9 % is below both percentage thresholds
    assert_eq!(rig.display.overlay(), None);
}

#[test]
fn test_idle_shows_empty_bars() {
    let mut rig = Rig::new();
    rig.run(0, 0);

    assert_eq!(rig.indicator(), (INDICATOR_OFF, INDICATOR_FULL));
    assert!(rig.alarm.output().started().is_empty());

    let frames = &rig.display.panel().flushed;
    assert_eq!(frames.len(), 1);
    let frame = &frames[0];
    for bar_x in [RAIN_BAR_X, LEVEL_BAR_X] {
        for row in 0..BAR_SEGMENTS {
            let origin = segment_origin(bar_x, row);
            assert!(frame[origin.y as usize][origin.x as usize], "outline at row {row}");
            let inside = origin + Point::new(15, 2);
            assert!(!frame[inside.y as usize][inside.x as usize], "fill at row {row}");
        }
    }
}

#[test]
fn test_level_alert_overlay() {
    let mut rig = Rig::new();
    // 48.9 % rain, 75.8 % level
    rig.run(2000, 3100);

    assert_eq!(rig.display.overlay(), Some(AlertOverlay::LevelOnly));
    assert_eq!(rig.indicator(), (INDICATOR_FULL, INDICATOR_OFF));
    assert!(FakePanel::lit(&rig.display.panel().flushed[1]) > 0);
}

#[test]
fn test_static_bus_serves_every_consumer() {
    static BUS: SampleBus = SampleBus::new();

    let mut subs: Vec<_> = (0..CONSUMER_COUNT).filter_map(|_| BUS.subscribe()).collect();
    assert_eq!(subs.len(), CONSUMER_COUNT);
    assert!(BUS.subscribe().is_none());

    let mut publisher = BUS.publisher();
    publisher.publish(SensorSample::new(4000, 1000));
    for sub in &mut subs {
        assert_eq!(sub.try_next().map(|p| p.sample), Some(SensorSample::new(4000, 1000)));
    }
}
