//! Hardware drivers written against `embedded-hal-async`.
//!
//! - `ssd1306`: Buffered async SSD1306 OLED driver over I2C

mod ssd1306;

pub use ssd1306::{HEIGHT, Ssd1306, WIDTH};
