//! Hardware seams.
//!
//! The sampler and the consumers only talk to hardware through these traits.
//! The firmware binary implements them on embassy-rp peripherals; host tests
//! implement them with recording fakes.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use rainwatch_common::alarm::SquareWave;
use rainwatch_common::matrix::MatrixFrame;

use crate::config::{LEVEL_ADC_GPIO, RAIN_ADC_GPIO};

/// Analog channel carrying one sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorChannel {
    /// Water level on ADC0.
    Level,
    /// Rainfall on ADC1.
    Rain,
}

impl SensorChannel {
    pub const fn gpio(self) -> u8 {
        match self {
            Self::Level => LEVEL_ADC_GPIO,
            Self::Rain => RAIN_ADC_GPIO,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Rain => "rain",
        }
    }
}

/// 12-bit ADC with one input per [`SensorChannel`].
pub trait AnalogInput {
    type Error;

    async fn read_channel(
        &mut self,
        channel: SensorChannel,
    ) -> Result<u16, Self::Error>;
}

/// One of the two indicator LEDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorChannel {
    Red,
    Green,
}

/// PWM brightness control for the indicator LEDs.
pub trait DutyOutput {
    /// Set the compare level of `channel` (0 = off, 100 = full).
    fn set_duty(
        &mut self,
        channel: IndicatorChannel,
        level: u16,
    );
}

/// PWM square-wave output driving the transducer.
pub trait ToneOutput {
    fn start(
        &mut self,
        wave: SquareWave,
    );

    fn stop(&mut self);
}

/// Addressable LED strip behind the 5x5 matrix.
pub trait PixelStrip {
    /// Write a whole frame; returns once the frame is latched.
    async fn write(
        &mut self,
        frame: &MatrixFrame,
    );
}

/// Buffered monochrome panel. Drawing only touches the buffer; [`Panel::flush`]
/// makes the whole frame visible at once.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    async fn flush(&mut self);
}
