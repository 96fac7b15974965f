//! Status strip under the panel: what the LEDs, matrix and buzzer are doing.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use profont::PROFONT_7_POINT;
use rainwatch_common::{SensorSample, Severity};
use rainwatch_common::alarm::AlarmPattern;
use rainwatch_common::indicator::{INDICATOR_FULL, IndicatorLevels};
use rainwatch_common::layout::SCREEN_HEIGHT;
use rainwatch_common::matrix::MatrixFrame;

/// Height of the strip in pixels.
pub const STATUS_HEIGHT: u32 = 40;

const MATRIX_SIDE: usize = 5;
const MATRIX_CELL: u32 = 6;
const MATRIX_X: i32 = 2;
const TEXT_X: i32 = 56;
const SWATCH_SIZE: Size = Size::new(14, 14);

const BACKGROUND: Rgb888 = Rgb888::new(16, 16, 24);
const DIM: Rgb888 = Rgb888::new(40, 40, 40);
const TEXT_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_7_POINT, Rgb888::WHITE);

/// Everything the strip shows for one frame.
pub struct StatusView<'a> {
    pub input: SensorSample,
    /// Quantized percentages currently on the panel.
    pub panel: Option<(u8, u8)>,
    pub severity: Severity,
    pub indicator: IndicatorLevels,
    pub matrix: &'a MatrixFrame,
    pub alarm: AlarmPattern,
    pub alarm_left_ms: u128,
}

/// Scale a PWM compare level onto an 8-bit channel.
fn duty_to_channel(level: u16) -> u8 {
    (u32::from(level.min(INDICATOR_FULL)) * 255 / u32::from(INDICATOR_FULL)) as u8
}

fn draw_matrix<D>(
    display: &mut D,
    origin: Point,
    frame: &MatrixFrame,
) where
    D: DrawTarget<Color = Rgb888>,
{
    for (i, px) in frame.iter().enumerate() {
        let col = (i % MATRIX_SIDE) as i32;
        let row = (i / MATRIX_SIDE) as i32;
        let color = if px.is_off() {
            DIM
        } else {
            Rgb888::new(px.r, px.g, px.b)
        };
        let step = (MATRIX_CELL + 1) as i32;
        Rectangle::new(origin + Point::new(col * step, row * step), Size::new(MATRIX_CELL, MATRIX_CELL))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)
            .ok();
    }
}

/// Redraw the strip below the panel area.
pub fn draw_status<D>(
    display: &mut D,
    view: &StatusView<'_>,
) where
    D: DrawTarget<Color = Rgb888>,
{
    let top = SCREEN_HEIGHT as i32;
    Rectangle::new(Point::new(0, top), Size::new(display.bounding_box().size.width, STATUS_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
        .draw(display)
        .ok();

    draw_matrix(display, Point::new(MATRIX_X, top + 3), view.matrix);

    let swatch = Rgb888::new(
        duty_to_channel(view.indicator.red),
        duty_to_channel(view.indicator.green),
        0,
    );
    let swatch_style = PrimitiveStyleBuilder::new()
        .fill_color(swatch)
        .stroke_color(DIM)
        .stroke_width(1)
        .build();
    Rectangle::new(Point::new(38, top + 3), SWATCH_SIZE)
        .into_styled(swatch_style)
        .draw(display)
        .ok();

    let mut line: String<24> = String::new();
    write!(line, "R {:4} L {:4}", view.input.rain_raw, view.input.level_raw).ok();
    Text::with_baseline(&line, Point::new(TEXT_X, top + 4), TEXT_STYLE, Baseline::Top)
        .draw(display)
        .ok();

    line.clear();
    if let Some((rain, level)) = view.panel {
        write!(line, "P {rain:3}% {level:3}%").ok();
    }
    Text::with_baseline(&line, Point::new(TEXT_X, top + 13), TEXT_STYLE, Baseline::Top)
        .draw(display)
        .ok();

    Text::with_baseline(view.severity.label(), Point::new(TEXT_X, top + 22), TEXT_STYLE, Baseline::Top)
        .draw(display)
        .ok();

    line.clear();
    write!(line, "{} {}ms", view.alarm.label(), view.alarm_left_ms).ok();
    Text::with_baseline(&line, Point::new(TEXT_X, top + 31), TEXT_STYLE, Baseline::Top)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rainwatch_common::indicator::INDICATOR_OFF;

    use super::*;

    #[test]
    fn test_duty_scaling() {
        assert_eq!(duty_to_channel(INDICATOR_OFF), 0);
        assert_eq!(duty_to_channel(INDICATOR_FULL), 255);
        assert_eq!(duty_to_channel(50), 127);
        assert_eq!(duty_to_channel(u16::MAX), 255);
    }
}
