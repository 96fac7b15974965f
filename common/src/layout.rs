//! Panel geometry and pre-computed layout constants.
//!
//! The panel is a 128x64 monochrome OLED. Two vertical bar graphs of ten
//! segments each fill the area under the title row:
//!
//! ```text
//!  RAIN  97%       LEVEL  24%
//!   [==========]     [          ]   <- 100 % segment, y = 14
//!   [==========]     [          ]
//!        ...              ...
//!   [==========]     [==========]   <- 10 % segment, y = 59
//! ```

use embedded_graphics::prelude::{Point, Size};

// =============================================================================
// Display Configuration
// =============================================================================

/// Panel width in pixels.
pub const SCREEN_WIDTH: u32 = 128;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Horizontal centre, used for centred overlay text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

// =============================================================================
// Title Row
// =============================================================================

/// Top edge of the title row.
pub const TITLE_Y: i32 = 3;

pub const RAIN_TITLE_X: i32 = 0;
pub const RAIN_VALUE_X: i32 = 30;
pub const LEVEL_TITLE_X: i32 = 64;
pub const LEVEL_VALUE_X: i32 = 98;

// =============================================================================
// Bar Graphs
// =============================================================================

/// Left edge of the rainfall bar.
pub const RAIN_BAR_X: i32 = 10;

/// Left edge of the water-level bar.
pub const LEVEL_BAR_X: i32 = 75;

/// Top edge of the 100 % segment.
pub const BAR_TOP_Y: i32 = 14;

pub const SEGMENT_WIDTH: u32 = 30;
pub const SEGMENT_HEIGHT: u32 = 5;

pub const SEGMENT_SIZE: Size = Size::new(SEGMENT_WIDTH, SEGMENT_HEIGHT);

const _: () = assert!(BAR_TOP_Y + 10 * SEGMENT_HEIGHT as i32 <= SCREEN_HEIGHT as i32);
const _: () = assert!(LEVEL_BAR_X + SEGMENT_WIDTH as i32 <= SCREEN_WIDTH as i32);
const _: () = assert!(RAIN_BAR_X + (SEGMENT_WIDTH as i32) < LEVEL_BAR_X);

/// Top-left corner of segment `row`, where row 0 is the 100 % segment at the top.
#[inline]
pub const fn segment_origin(
    bar_x: i32,
    row: u8,
) -> Point {
    Point::new(bar_x, BAR_TOP_Y + row as i32 * SEGMENT_HEIGHT as i32)
}

// =============================================================================
// Alert Overlay
// =============================================================================

/// Rows used by a single-axis overlay.
pub const OVERLAY_SINGLE_TITLE_Y: i32 = 20;
pub const OVERLAY_SINGLE_MESSAGE_Y: i32 = 30;

/// Rows used by the dual overlay (rain block on top, level block below).
pub const OVERLAY_DUAL_RAIN_TITLE_Y: i32 = 10;
pub const OVERLAY_DUAL_RAIN_MESSAGE_Y: i32 = 20;
pub const OVERLAY_DUAL_LEVEL_TITLE_Y: i32 = 40;
pub const OVERLAY_DUAL_LEVEL_MESSAGE_Y: i32 = 50;
