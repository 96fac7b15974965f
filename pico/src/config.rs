//! Board configuration: pin map, cadences and bus settings.
//!
//! | Function          | GPIO | Peripheral        |
//! |-------------------|------|-------------------|
//! | Water level       | 26   | ADC0              |
//! | Rainfall          | 27   | ADC1              |
//! | Panel SDA / SCL   | 14 / 15 | I2C1           |
//! | LED matrix        | 7    | PIO0 SM0          |
//! | Red indicator     | 13   | PWM slice 6, B    |
//! | Green indicator   | 11   | PWM slice 5, B    |
//! | Transducer        | 21   | PWM slice 2, B    |

/// Sampling period of both analog channels (10 Hz).
pub const SAMPLE_PERIOD_MS: u64 = 100;

/// Pause every consumer takes after handling a sample.
pub const CONSUMER_SETTLE_MS: u32 = 50;

/// I2C clock for the panel.
pub const I2C_FREQUENCY: u32 = 400_000;

/// 7-bit I2C address of the SSD1306 panel.
pub const PANEL_ADDRESS: u8 = 0x3C;

pub const LEVEL_ADC_GPIO: u8 = 26;
pub const RAIN_ADC_GPIO: u8 = 27;
pub const I2C_SDA_GPIO: u8 = 14;
pub const I2C_SCL_GPIO: u8 = 15;
pub const MATRIX_GPIO: u8 = 7;
pub const RED_LED_GPIO: u8 = 13;
pub const GREEN_LED_GPIO: u8 = 11;
pub const BUZZER_GPIO: u8 = 21;
