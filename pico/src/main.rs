//! Rainfall and Water-Level Monitor Firmware for Raspberry Pi Pico (RP2040)
//!
//! Samples two analog sensors at 10 Hz and reports them on four outputs.
//!
//! # Architecture
//!
//! One producer and four consumers on the thread-mode executor:
//! - Sampler task: reads ADC0/ADC1 on a ticker and publishes to the sample bus
//! - Indicator, matrix and alarm tasks: react to the newest sample at their own pace
//! - Main task: initializes the board, then runs the display consumer itself
//!
//! Consumers never queue samples; each one picks up the latest value when it
//! is ready, so a long alarm or overlay never stalls the sampler.
//!
//! Host builds compile a stub `main` so `cargo test` works across the workspace.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod board;

#[cfg(target_arch = "arm")]
use {
    crate::board::{RpAnalog, RpIndicator, RpMatrix, RpTone, indicator_pwm_config, tone_pwm_config},
    defmt::{debug, info, warn},
    embassy_executor::Spawner,
    embassy_rp::adc::{self, Adc, Channel},
    embassy_rp::bind_interrupts,
    embassy_rp::clocks::clk_sys_freq,
    embassy_rp::gpio::Pull,
    embassy_rp::i2c::{self, I2c},
    embassy_rp::peripherals::{I2C1, PIO0},
    embassy_rp::pio::{self, Pio},
    embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program},
    embassy_rp::pwm::Pwm,
    embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
    embassy_time::{Delay, Duration, Ticker},
    rainwatch_common::bus::{SampleBus, Subscriber},
    rainwatch_pico::config::{
        BUZZER_GPIO,
        GREEN_LED_GPIO,
        I2C_FREQUENCY,
        I2C_SCL_GPIO,
        I2C_SDA_GPIO,
        LEVEL_ADC_GPIO,
        MATRIX_GPIO,
        PANEL_ADDRESS,
        RAIN_ADC_GPIO,
        RED_LED_GPIO,
        SAMPLE_PERIOD_MS,
    },
    rainwatch_pico::consumers::run,
    rainwatch_pico::drivers::Ssd1306,
    rainwatch_pico::{AlarmConsumer, DisplayConsumer, IndicatorConsumer, MatrixConsumer, Sampler},
    {defmt_rtt as _, panic_probe as _},
};

#[cfg(target_arch = "arm")]
bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

/// Program metadata shown by `picotool info`.
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"rainwatch"),
    embassy_rp::binary_info::rp_program_description!(c"Rainfall and water-level monitor"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// =============================================================================
// Sample Bus
// =============================================================================

/// Latest-sample slot shared by the sampler and the four consumers.
/// Initialized at compile time (SampleBus::new() is const).
#[cfg(target_arch = "arm")]
static BUS: SampleBus = SampleBus::new();

#[cfg(target_arch = "arm")]
type BusSubscriber = Subscriber<'static, CriticalSectionRawMutex>;

// =============================================================================
// Tasks
// =============================================================================

/// Sampler task - reads both channels every `SAMPLE_PERIOD_MS` and publishes.
#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn sampler_task(mut sampler: Sampler<RpAnalog>) {
    info!("Sampler task started");

    let mut publisher = BUS.publisher();
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));
    loop {
        let sample = sampler.sample().await;
        let seq = publisher.publish(sample);
        debug!("sample #{}: rain={} level={}", seq, sample.rain_raw, sample.level_raw);
        ticker.next().await;
    }
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn indicator_task(
    mut indicator: IndicatorConsumer<RpIndicator>,
    subscriber: BusSubscriber,
) {
    run(&mut indicator, subscriber, Delay).await
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn matrix_task(
    mut matrix: MatrixConsumer<RpMatrix>,
    subscriber: BusSubscriber,
) {
    run(&mut matrix, subscriber, Delay).await
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn alarm_task(
    mut alarm: AlarmConsumer<RpTone>,
    subscriber: BusSubscriber,
) {
    run(&mut alarm, subscriber, Delay).await
}

// =============================================================================
// Entry Point
// =============================================================================

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Rainwatch starting...");

    let p = embassy_rp::init(Default::default());
    let clk_sys_hz = clk_sys_freq();
    info!("clk_sys at {} MHz", clk_sys_hz / 1_000_000);

    // Analog inputs: level on ADC0, rain on ADC1
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let level = Channel::new_pin(p.PIN_26, Pull::None);
    let rain = Channel::new_pin(p.PIN_27, Pull::None);
    let sampler = Sampler::new(RpAnalog::new(adc, level, rain));
    info!("ADC initialized (level GPIO{}, rain GPIO{})", LEVEL_ADC_GPIO, RAIN_ADC_GPIO);

    // OLED panel on I2C1
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);
    let mut panel = Ssd1306::new(i2c, PANEL_ADDRESS);
    match panel.init().await {
        Ok(()) => info!(
            "Panel initialized (SDA GPIO{}, SCL GPIO{}, {} kHz)",
            I2C_SDA_GPIO,
            I2C_SCL_GPIO,
            I2C_FREQUENCY / 1000
        ),
        Err(e) => warn!("Panel init failed: {:?}", e),
    }
    let mut display = DisplayConsumer::new(panel);

    // LED matrix on PIO0
    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
    let matrix = MatrixConsumer::new(RpMatrix::new(ws2812));
    info!("LED matrix initialized (GPIO{})", MATRIX_GPIO);

    // Indicator LEDs and transducer
    let red = Pwm::new_output_b(p.PWM_SLICE6, p.PIN_13, indicator_pwm_config());
    let green = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, indicator_pwm_config());
    let indicator = IndicatorConsumer::new(RpIndicator::new(red, green));
    let buzzer = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, tone_pwm_config());
    let alarm = AlarmConsumer::new(RpTone::new(buzzer), clk_sys_hz);
    info!(
        "PWM initialized (red GPIO{}, green GPIO{}, buzzer GPIO{})",
        RED_LED_GPIO,
        GREEN_LED_GPIO,
        BUZZER_GPIO
    );

    // Subscribe every consumer before the first sample is published
    let display_subscriber = BUS.subscribe().unwrap();
    spawner.spawn(indicator_task(indicator, BUS.subscribe().unwrap())).unwrap();
    spawner.spawn(matrix_task(matrix, BUS.subscribe().unwrap())).unwrap();
    spawner.spawn(alarm_task(alarm, BUS.subscribe().unwrap())).unwrap();
    spawner.spawn(sampler_task(sampler)).unwrap();
    info!("Tasks spawned");

    // The display runs here so the PIO handles above stay alive
    run(&mut display, display_subscriber, Delay).await
}

#[cfg(not(target_arch = "arm"))]
fn main() {
    println!("rainwatch firmware: build with --target thumbv6m-none-eabi");
}
