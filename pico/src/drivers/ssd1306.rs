//! Async SSD1306 driver for the 128x64 I2C OLED.
//!
//! Drawing goes into a 1 KiB page-ordered framebuffer; [`Ssd1306::write_frame`]
//! sends the whole buffer in horizontal addressing mode, so the panel never
//! shows a half-drawn frame.
//!
//! # Framebuffer Layout
//!
//! The panel is split into 8 pages of 8 rows. Byte `page * 128 + x` holds
//! column `x` of that page, least significant bit on top:
//!
//! ```text
//! y = 0..7   -> page 0, bit y
//! y = 8..15  -> page 1, bit y - 8
//! ```

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal_async::i2c::I2c;

use crate::hal::Panel;

/// Display dimensions.
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;
const BUFFER_SIZE: usize = WIDTH * PAGES;

// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

// SSD1306 Commands
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const CLOCK_DIV: u8 = 0xD5;
const MULTIPLEX: u8 = 0xA8;
const DISPLAY_OFFSET: u8 = 0xD3;
const START_LINE: u8 = 0x40;
const CHARGE_PUMP: u8 = 0x8D;
const MEMORY_MODE: u8 = 0x20;
const SEG_REMAP: u8 = 0xA1;
const COM_SCAN_DEC: u8 = 0xC8;
const COM_PINS: u8 = 0xDA;
const CONTRAST: u8 = 0x81;
const PRECHARGE: u8 = 0xD9;
const VCOM_DETECT: u8 = 0xDB;
const RESUME_RAM: u8 = 0xA4;
const NORMAL_DISPLAY: u8 = 0xA6;
const SCROLL_OFF: u8 = 0x2E;
const COLUMN_ADDR: u8 = 0x21;
const PAGE_ADDR: u8 = 0x22;

/// Power-up sequence for a 128x64 panel with the internal charge pump.
const INIT_SEQUENCE: [u8; 26] = [
    CONTROL_COMMAND,
    DISPLAY_OFF,
    CLOCK_DIV,
    0x80,
    MULTIPLEX,
    (HEIGHT - 1) as u8,
    DISPLAY_OFFSET,
    0x00,
    START_LINE,
    CHARGE_PUMP,
    0x14,
    MEMORY_MODE,
    0x00, // horizontal addressing
    SEG_REMAP,
    COM_SCAN_DEC,
    COM_PINS,
    0x12,
    CONTRAST,
    0xCF,
    PRECHARGE,
    0xF1,
    VCOM_DETECT,
    0x40,
    RESUME_RAM,
    NORMAL_DISPLAY,
    DISPLAY_ON,
];

/// Buffered SSD1306 panel on an async I2C bus.
pub struct Ssd1306<I> {
    i2c: I,
    address: u8,
    buffer: [u8; BUFFER_SIZE],
}

impl<I: I2c> Ssd1306<I> {
    /// Create a driver with a blank framebuffer. Call [`Self::init`] before use.
    pub fn new(
        i2c: I,
        address: u8,
    ) -> Self {
        Self {
            i2c,
            address,
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Power up the panel and blank it.
    pub async fn init(&mut self) -> Result<(), I::Error> {
        self.i2c.write(self.address, &INIT_SEQUENCE).await?;
        self.i2c.write(self.address, &[CONTROL_COMMAND, SCROLL_OFF]).await?;
        self.clear_buffer(BinaryColor::Off);
        self.write_frame().await
    }

    /// Send the whole framebuffer, one page per transfer.
    pub async fn write_frame(&mut self) -> Result<(), I::Error> {
        self.i2c
            .write(
                self.address,
                &[
                    CONTROL_COMMAND,
                    COLUMN_ADDR,
                    0,
                    (WIDTH - 1) as u8,
                    PAGE_ADDR,
                    0,
                    (PAGES - 1) as u8,
                ],
            )
            .await?;

        let mut chunk = [0u8; WIDTH + 1];
        chunk[0] = CONTROL_DATA;
        for page in self.buffer.chunks_exact(WIDTH) {
            chunk[1..].copy_from_slice(page);
            self.i2c.write(self.address, &chunk).await?;
        }
        Ok(())
    }

    /// Fill the framebuffer with one color.
    pub fn clear_buffer(
        &mut self,
        color: BinaryColor,
    ) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Raw framebuffer contents.
    #[inline]
    pub fn buffer(&self) -> &[u8] { &self.buffer }

    /// Release the bus.
    pub fn release(self) -> I { self.i2c }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: BinaryColor,
    ) {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = (y as usize / 8) * WIDTH + x as usize;
            let mask = 1 << (y as usize % 8);
            if color.is_on() {
                self.buffer[idx] |= mask;
            } else {
                self.buffer[idx] &= !mask;
            }
        }
    }
}

impl<I> OriginDimensions for Ssd1306<I> {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl<I: I2c> DrawTarget for Ssd1306<I> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<P>(
        &mut self,
        pixels: P,
    ) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.clear_buffer(color);
        Ok(())
    }
}

impl<I: I2c> Panel for Ssd1306<I> {
    async fn flush(&mut self) {
        if self.write_frame().await.is_err() {
            log_warn!("panel flush failed, frame dropped");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;
    use crate::config::PANEL_ADDRESS;
    use crate::fakes::FakeI2c;

    fn panel() -> Ssd1306<FakeI2c> { Ssd1306::new(FakeI2c::default(), PANEL_ADDRESS) }

    #[test]
    fn test_init_powers_up_and_blanks() {
        let mut display = panel();
        display.buffer[3] = 0xAA;
        block_on(display.init()).unwrap();

        let i2c = display.release();
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == PANEL_ADDRESS));

        let (_, first) = &i2c.writes[0];
        assert_eq!(first[0], CONTROL_COMMAND);
        assert_eq!(first[1], DISPLAY_OFF);
        assert_eq!(*first.last().unwrap(), DISPLAY_ON);

        // Command, address window, then 8 blank pages
        let pages: Vec<_> = i2c.writes.iter().filter(|(_, w)| w[0] == CONTROL_DATA).collect();
        assert_eq!(pages.len(), PAGES);
        assert!(pages.iter().all(|(_, w)| w.len() == WIDTH + 1 && w[1..].iter().all(|b| *b == 0)));
    }

    #[test]
    fn test_pixel_addressing() {
        let mut display = panel();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut display).ok();
        Pixel(Point::new(5, 9), BinaryColor::On).draw(&mut display).ok();
        Pixel(Point::new(127, 63), BinaryColor::On).draw(&mut display).ok();

        assert_eq!(display.buffer()[0], 0b0000_0001);
        assert_eq!(display.buffer()[WIDTH + 5], 0b0000_0010);
        assert_eq!(display.buffer()[BUFFER_SIZE - 1], 0b1000_0000);

        Pixel(Point::new(5, 9), BinaryColor::Off).draw(&mut display).ok();
        assert_eq!(display.buffer()[WIDTH + 5], 0);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut display = panel();
        Rectangle::new(Point::new(-10, -10), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .ok();
        Pixel(Point::new(128, 0), BinaryColor::On).draw(&mut display).ok();
        Pixel(Point::new(0, 64), BinaryColor::On).draw(&mut display).ok();
        assert!(display.buffer().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_frame_carries_buffer_contents() {
        let mut display = panel();
        display.clear(BinaryColor::On).ok();
        Pixel(Point::new(2, 8), BinaryColor::Off).draw(&mut display).ok();
        block_on(display.write_frame()).unwrap();

        let i2c = display.release();
        assert_eq!(i2c.writes.len(), 1 + PAGES);
        assert_eq!(i2c.writes[0].1, vec![CONTROL_COMMAND, COLUMN_ADDR, 0, 127, PAGE_ADDR, 0, 7]);

        let page1 = &i2c.writes[2].1;
        assert_eq!(page1[0], CONTROL_DATA);
        assert_eq!(page1[1 + 2], 0xFE);
        assert_eq!(page1[1 + 3], 0xFF);
    }

    #[test]
    fn test_bus_errors() {
        let mut display = Ssd1306::new(FakeI2c::failing(), PANEL_ADDRESS);
        assert!(block_on(display.init()).is_err());
        // The panel seam swallows the error
        block_on(Panel::flush(&mut display));
        assert!(display.release().writes.is_empty());
    }
}
