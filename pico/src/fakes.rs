//! Recording fakes for every hardware seam, used by the host tests.

use std::collections::VecDeque;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation};
use rainwatch_common::alarm::SquareWave;
use rainwatch_common::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use rainwatch_common::matrix::MatrixFrame;

use crate::hal::{AnalogInput, DutyOutput, IndicatorChannel, Panel, PixelStrip, SensorChannel, ToneOutput};

// =============================================================================
// Delay
// =============================================================================

/// Records every millisecond delay instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub delays_ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u32 { self.delays_ms.iter().sum() }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.delays_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        self.delays_ms.push(ms);
    }
}

// =============================================================================
// Analog Input
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdcFault;

/// Replays queued readings per channel; an empty queue reads as a fault.
#[derive(Debug, Default)]
pub struct FakeAdc {
    pub level: VecDeque<Result<u16, AdcFault>>,
    pub rain: VecDeque<Result<u16, AdcFault>>,
    pub reads: Vec<SensorChannel>,
}

impl FakeAdc {
    pub fn push(
        &mut self,
        rain: Result<u16, AdcFault>,
        level: Result<u16, AdcFault>,
    ) {
        self.rain.push_back(rain);
        self.level.push_back(level);
    }
}

impl AnalogInput for FakeAdc {
    type Error = AdcFault;

    async fn read_channel(
        &mut self,
        channel: SensorChannel,
    ) -> Result<u16, Self::Error> {
        self.reads.push(channel);
        let queue = match channel {
            SensorChannel::Level => &mut self.level,
            SensorChannel::Rain => &mut self.rain,
        };
        queue.pop_front().unwrap_or(Err(AdcFault))
    }
}

// =============================================================================
// PWM
// =============================================================================

#[derive(Debug, Default)]
pub struct FakeDuty {
    pub red: u16,
    pub green: u16,
    pub writes: Vec<(IndicatorChannel, u16)>,
}

impl DutyOutput for FakeDuty {
    fn set_duty(
        &mut self,
        channel: IndicatorChannel,
        level: u16,
    ) {
        match channel {
            IndicatorChannel::Red => self.red = level,
            IndicatorChannel::Green => self.green = level,
        }
        self.writes.push((channel, level));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneEvent {
    Start(SquareWave),
    Stop,
}

#[derive(Debug, Default)]
pub struct FakeTone {
    pub events: Vec<ToneEvent>,
}

impl FakeTone {
    /// Waves started, in order.
    pub fn started(&self) -> Vec<SquareWave> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ToneEvent::Start(w) => Some(*w),
                ToneEvent::Stop => None,
            })
            .collect()
    }
}

impl ToneOutput for FakeTone {
    fn start(
        &mut self,
        wave: SquareWave,
    ) {
        self.events.push(ToneEvent::Start(wave));
    }

    fn stop(&mut self) { self.events.push(ToneEvent::Stop); }
}

// =============================================================================
// LED Strip
// =============================================================================

#[derive(Debug, Default)]
pub struct FakeStrip {
    pub frames: Vec<MatrixFrame>,
}

impl PixelStrip for FakeStrip {
    async fn write(
        &mut self,
        frame: &MatrixFrame,
    ) {
        self.frames.push(*frame);
    }
}

// =============================================================================
// Panel
// =============================================================================

const W: usize = SCREEN_WIDTH as usize;
const H: usize = SCREEN_HEIGHT as usize;

pub type Frame = Vec<[bool; W]>;

/// In-memory panel; each flush snapshots the buffer.
#[derive(Debug)]
pub struct FakePanel {
    buffer: Frame,
    pub flushed: Vec<Frame>,
}

impl Default for FakePanel {
    fn default() -> Self {
        Self {
            buffer: vec![[false; W]; H],
            flushed: Vec::new(),
        }
    }
}

impl FakePanel {
    pub fn lit(frame: &Frame) -> usize { frame.iter().map(|row| row.iter().filter(|p| **p).count()).sum() }
}

impl OriginDimensions for FakePanel {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for FakePanel {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H {
                self.buffer[p.y as usize][p.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl Panel for FakePanel {
    async fn flush(&mut self) { self.flushed.push(self.buffer.clone()); }
}

// =============================================================================
// I2C
// =============================================================================

/// Records every write; a failing bus rejects all transactions.
#[derive(Debug, Default)]
pub struct FakeI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    fail: bool,
}

impl FakeI2c {
    pub fn failing() -> Self {
        Self {
            writes: Vec::new(),
            fail: true,
        }
    }
}

impl ErrorType for FakeI2c {
    type Error = ErrorKind;
}

impl I2c for FakeI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        for op in operations {
            if let Operation::Write(bytes) = op {
                self.writes.push((address, bytes.to_vec()));
            }
        }
        Ok(())
    }
}
