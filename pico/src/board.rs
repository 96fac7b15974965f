//! embassy-rp implementations of the hardware seams.

use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812};
use embassy_rp::pwm::{self, Pwm};
use rainwatch_common::alarm::SquareWave;
use rainwatch_common::indicator::{INDICATOR_OFF, INDICATOR_PWM_DIVIDER, INDICATOR_PWM_TOP};
use rainwatch_common::matrix::{MATRIX_PIXELS, MatrixFrame};
use rainwatch_pico::hal::{AnalogInput, DutyOutput, IndicatorChannel, PixelStrip, SensorChannel, ToneOutput};
use smart_leds::RGB8;

// =============================================================================
// ADC
// =============================================================================

pub struct RpAnalog {
    adc: Adc<'static, adc::Async>,
    level: Channel<'static>,
    rain: Channel<'static>,
}

impl RpAnalog {
    pub fn new(
        adc: Adc<'static, adc::Async>,
        level: Channel<'static>,
        rain: Channel<'static>,
    ) -> Self {
        Self { adc, level, rain }
    }
}

impl AnalogInput for RpAnalog {
    type Error = adc::Error;

    async fn read_channel(
        &mut self,
        channel: SensorChannel,
    ) -> Result<u16, Self::Error> {
        let input = match channel {
            SensorChannel::Level => &mut self.level,
            SensorChannel::Rain => &mut self.rain,
        };
        self.adc.read(input).await
    }
}

// =============================================================================
// PWM
// =============================================================================

/// Initial config for an indicator slice: divider 4, top 100, output B dark.
pub fn indicator_pwm_config() -> pwm::Config {
    let mut config = pwm::Config::default();
    config.divider = INDICATOR_PWM_DIVIDER.into();
    config.top = INDICATOR_PWM_TOP;
    config.compare_b = INDICATOR_OFF;
    config
}

/// Initial config for the transducer slice: silent.
pub fn tone_pwm_config() -> pwm::Config {
    let mut config = pwm::Config::default();
    config.compare_b = 0;
    config
}

/// Red and green LEDs, each on output B of its own slice.
pub struct RpIndicator {
    red: Pwm<'static>,
    green: Pwm<'static>,
    red_config: pwm::Config,
    green_config: pwm::Config,
}

impl RpIndicator {
    pub fn new(
        red: Pwm<'static>,
        green: Pwm<'static>,
    ) -> Self {
        Self {
            red,
            green,
            red_config: indicator_pwm_config(),
            green_config: indicator_pwm_config(),
        }
    }
}

impl DutyOutput for RpIndicator {
    fn set_duty(
        &mut self,
        channel: IndicatorChannel,
        level: u16,
    ) {
        let (pwm, config) = match channel {
            IndicatorChannel::Red => (&mut self.red, &mut self.red_config),
            IndicatorChannel::Green => (&mut self.green, &mut self.green_config),
        };
        config.compare_b = level;
        pwm.set_config(config);
    }
}

/// Transducer on output B of one slice.
pub struct RpTone {
    pwm: Pwm<'static>,
    config: pwm::Config,
}

impl RpTone {
    pub fn new(pwm: Pwm<'static>) -> Self {
        Self {
            pwm,
            config: tone_pwm_config(),
        }
    }
}

impl ToneOutput for RpTone {
    fn start(
        &mut self,
        wave: SquareWave,
    ) {
        self.config.divider = wave.divider.into();
        self.config.top = wave.top;
        self.config.compare_b = wave.compare;
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}

// =============================================================================
// LED Matrix
// =============================================================================

/// WS2812 matrix on PIO0 state machine 0.
pub struct RpMatrix {
    ws2812: PioWs2812<'static, PIO0, 0, MATRIX_PIXELS, Grb>,
}

impl RpMatrix {
    pub fn new(ws2812: PioWs2812<'static, PIO0, 0, MATRIX_PIXELS, Grb>) -> Self { Self { ws2812 } }
}

impl PixelStrip for RpMatrix {
    async fn write(
        &mut self,
        frame: &MatrixFrame,
    ) {
        // The strip has no white channel
        let colors = frame.map(|px| RGB8::new(px.r, px.g, px.b));
        self.ws2812.write(&colors).await;
    }
}
