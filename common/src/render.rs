//! Bar-graph view and alert overlays for the monochrome panel.
//!
//! This module provides:
//! - [`DashboardView`] - Everything one dashboard frame shows, derived from a sample
//! - [`AlertOverlay`] - The three full-screen alert variants and their selection rule
//! - [`draw_dashboard`] / [`draw_alert_overlay`] - Full-frame drawing onto any `DrawTarget`
//!
//! # Frame Sequence
//!
//! | Step | Content | Hold |
//! |------|---------|------|
//! | 1 | Bars + labels | until next sample, or [`OVERLAY_LEAD_MS`] if an overlay follows |
//! | 2 | Overlay (only if a percentage threshold is met) | [`OVERLAY_DWELL_MS`] |
//!
//! Both draw functions clear the whole target first; callers flush afterwards.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use heapless::String;

use crate::layout::{
    CENTER_X,
    LEVEL_BAR_X,
    LEVEL_TITLE_X,
    LEVEL_VALUE_X,
    OVERLAY_DUAL_LEVEL_MESSAGE_Y,
    OVERLAY_DUAL_LEVEL_TITLE_Y,
    OVERLAY_DUAL_RAIN_MESSAGE_Y,
    OVERLAY_DUAL_RAIN_TITLE_Y,
    OVERLAY_SINGLE_MESSAGE_Y,
    OVERLAY_SINGLE_TITLE_Y,
    RAIN_BAR_X,
    RAIN_TITLE_X,
    RAIN_VALUE_X,
    SEGMENT_SIZE,
    TITLE_Y,
    segment_origin,
};
use crate::sample::{BAR_SEGMENTS, NormalizedSample, QuantizedPercent, SensorSample, clamp_percent};
use crate::thresholds::PERCENT_THRESHOLDS;

/// How long the bars stay up before an overlay replaces them.
pub const OVERLAY_LEAD_MS: u32 = 1000;

/// How long an overlay stays up.
pub const OVERLAY_DWELL_MS: u32 = 1000;

// =============================================================================
// Styles
// =============================================================================

// 10 px rows match the overlay row spacing
const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();
const TOP_CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

const SEGMENT_EMPTY: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
const SEGMENT_FILLED: PrimitiveStyle<BinaryColor> = PrimitiveStyleBuilder::new()
    .stroke_color(BinaryColor::On)
    .stroke_width(1)
    .fill_color(BinaryColor::On)
    .build();

// =============================================================================
// Views
// =============================================================================

/// Percent label text, e.g. `"97%"`.
pub type PercentLabel = String<5>;

/// One axis of the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct BarView {
    /// Clamped percentage in `[0, 100]`.
    pub percent: f32,
    pub quantized: QuantizedPercent,
    pub label: PercentLabel,
}

impl BarView {
    pub fn from_percent(pct: f32) -> Self {
        let percent = clamp_percent(pct);
        Self {
            percent,
            quantized: QuantizedPercent::from_percent(percent),
            label: percent_label(percent),
        }
    }

    /// Whether segment `row` (0 = top / 100 %) is filled.
    #[inline]
    pub const fn is_segment_filled(
        &self,
        row: u8,
    ) -> bool {
        BAR_SEGMENTS - row <= self.quantized.filled_segments()
    }
}

/// Format a clamped percentage truncated to a whole number.
///
/// Truncation gives the same digits as integer `raw * 100 / 4088`.
pub fn percent_label(pct: f32) -> PercentLabel {
    let whole = micromath::F32(clamp_percent(pct)).floor().0 as u8;
    let mut label = PercentLabel::new();
    // "100%" is the longest possible label and fits
    write!(label, "{whole}%").ok();
    label
}

/// Full-screen alert variant, chosen from the percentage table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertOverlay {
    /// Heavy rain and high water level together.
    Both,
    /// High water level only.
    LevelOnly,
    /// Heavy rain only.
    RainOnly,
}

impl AlertOverlay {
    /// Select the overlay for a normalized sample, if any threshold is met.
    pub fn evaluate(sample: NormalizedSample) -> Option<Self> {
        let rain = sample.rain_pct >= PERCENT_THRESHOLDS.rain_alert;
        let level = sample.level_pct >= PERCENT_THRESHOLDS.level_alert;
        match (rain, level) {
            (true, true) => Some(Self::Both),
            (false, true) => Some(Self::LevelOnly),
            (true, false) => Some(Self::RainOnly),
            (false, false) => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Both => "RAIN+LEVEL",
            Self::LevelOnly => "LEVEL",
            Self::RainOnly => "RAIN",
        }
    }
}

/// Everything shown for one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub rain: BarView,
    pub level: BarView,
    pub overlay: Option<AlertOverlay>,
}

impl DashboardView {
    pub fn from_sample(sample: SensorSample) -> Self { Self::from_normalized(sample.normalize()) }

    pub fn from_normalized(normalized: NormalizedSample) -> Self {
        Self {
            rain: BarView::from_percent(normalized.rain_pct),
            level: BarView::from_percent(normalized.level_pct),
            overlay: AlertOverlay::evaluate(normalized),
        }
    }
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw a ten-segment bar, top (100 %) segment first.
pub fn draw_bar<D>(
    display: &mut D,
    bar_x: i32,
    bar: &BarView,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    for row in 0..BAR_SEGMENTS {
        let style = if bar.is_segment_filled(row) {
            SEGMENT_FILLED
        } else {
            SEGMENT_EMPTY
        };
        Rectangle::new(segment_origin(bar_x, row), SEGMENT_SIZE)
            .into_styled(style)
            .draw(display)
            .ok();
    }
}

/// Clear the target and draw both bars with their titles and values.
pub fn draw_dashboard<D>(
    display: &mut D,
    view: &DashboardView,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off).ok();

    Text::with_text_style("RAIN", Point::new(RAIN_TITLE_X, TITLE_Y), TEXT_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
    Text::with_text_style(&view.rain.label, Point::new(RAIN_VALUE_X, TITLE_Y), TEXT_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
    draw_bar(display, RAIN_BAR_X, &view.rain);

    Text::with_text_style("LEVEL", Point::new(LEVEL_TITLE_X, TITLE_Y), TEXT_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
    Text::with_text_style(&view.level.label, Point::new(LEVEL_VALUE_X, TITLE_Y), TEXT_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
    draw_bar(display, LEVEL_BAR_X, &view.level);
}

fn draw_alert_block<D>(
    display: &mut D,
    message: &str,
    title_y: i32,
    message_y: i32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_text_style("ALERT", Point::new(CENTER_X, title_y), TEXT_STYLE, TOP_CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(message, Point::new(CENTER_X, message_y), TEXT_STYLE, TOP_CENTERED)
        .draw(display)
        .ok();
}

/// Clear the target and draw the given overlay variant.
pub fn draw_alert_overlay<D>(
    display: &mut D,
    overlay: AlertOverlay,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off).ok();

    match overlay {
        AlertOverlay::Both => {
            draw_alert_block(display, "HEAVY RAIN", OVERLAY_DUAL_RAIN_TITLE_Y, OVERLAY_DUAL_RAIN_MESSAGE_Y);
            draw_alert_block(
                display,
                "HIGH WATER LEVEL",
                OVERLAY_DUAL_LEVEL_TITLE_Y,
                OVERLAY_DUAL_LEVEL_MESSAGE_Y,
            );
        }
        AlertOverlay::LevelOnly => {
            draw_alert_block(display, "HIGH WATER LEVEL", OVERLAY_SINGLE_TITLE_Y, OVERLAY_SINGLE_MESSAGE_Y);
        }
        AlertOverlay::RainOnly => {
            draw_alert_block(display, "HEAVY RAIN", OVERLAY_SINGLE_TITLE_Y, OVERLAY_SINGLE_MESSAGE_Y);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
