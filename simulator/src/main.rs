//! Rainwatch Simulator for Desktop.
//!
//! Runs the shared classifier, renderer, matrix animator and alarm pattern
//! code against keyboard-driven readings using embedded-graphics-simulator.
//!
//! Keys:
//! - Left/Right: rainfall reading down/up
//! - Down/Up: water-level reading down/up
//! - R: reset both readings to 0

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod stages;
mod state;
mod status;
mod timing;

use std::thread;
use std::time::Instant;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use rainwatch_common::bus::SampleBus;
use rainwatch_common::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::stages::{AlarmStage, DisplayStage, IndicatorStage, MatrixStage};
use crate::state::{Adjust, Axis, Readings};
use crate::status::{STATUS_HEIGHT, StatusView, draw_status};
use crate::timing::{FRAME_TIME, SAMPLE_PERIOD};

/// Map a key press onto a reading change.
fn adjust_for(keycode: Keycode) -> Option<Adjust> {
    match keycode {
        Keycode::Right => Some(Adjust::Up(Axis::Rain)),
        Keycode::Left => Some(Adjust::Down(Axis::Rain)),
        Keycode::Up => Some(Adjust::Up(Axis::Level)),
        Keycode::Down => Some(Adjust::Down(Axis::Level)),
        Keycode::R => Some(Adjust::Reset),
        _ => None,
    }
}

fn main() {
    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT + STATUS_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(4).build();
    let mut window = Window::new("Rainwatch Sim", &output_settings);

    display.clear(Rgb888::BLACK).ok();
    window.update(&display);

    let panel_area = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

    // One bus, one subscriber per simulated consumer
    let bus: SampleBus<NoopRawMutex> = SampleBus::new();
    let mut publisher = bus.publisher();
    let (Some(mut display_sub), Some(mut indicator_sub), Some(mut matrix_sub), Some(mut alarm_sub)) =
        (bus.subscribe(), bus.subscribe(), bus.subscribe(), bus.subscribe())
    else {
        eprintln!("sample bus has fewer than four subscriber slots");
        return;
    };

    let start = Instant::now();
    let mut readings = Readings::new();
    let mut panel_stage = DisplayStage::new(start);
    let mut indicator_stage = IndicatorStage::default();
    let mut matrix_stage = MatrixStage::new(start);
    let mut alarm_stage = AlarmStage::new(start);
    let mut next_sample = start;

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if let Some(adjust) = adjust_for(keycode) {
                        readings.apply(adjust);
                    }
                }
                _ => {}
            }
        }

        // Sampler at 10 Hz
        if frame_start >= next_sample {
            publisher.publish(readings.sample());
            next_sample += SAMPLE_PERIOD;
        }

        {
            let mut cropped = display.cropped(&panel_area);
            let mut panel = cropped.color_converted::<BinaryColor>();
            panel_stage.poll(frame_start, &mut display_sub, &mut panel);
        }
        indicator_stage.poll(frame_start, &mut indicator_sub);
        matrix_stage.poll(frame_start, &mut matrix_sub);
        alarm_stage.poll(frame_start, &mut alarm_sub);

        draw_status(
            &mut display,
            &StatusView {
                input: readings.sample(),
                panel: panel_stage.percentages(),
                severity: indicator_stage.severity(),
                indicator: indicator_stage.levels(),
                matrix: matrix_stage.frame(),
                alarm: alarm_stage.playing(),
                alarm_left_ms: alarm_stage.remaining(frame_start).as_millis(),
            },
        );

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(adjust_for(Keycode::Right), Some(Adjust::Up(Axis::Rain)));
        assert_eq!(adjust_for(Keycode::Down), Some(Adjust::Down(Axis::Level)));
        assert_eq!(adjust_for(Keycode::R), Some(Adjust::Reset));
        assert_eq!(adjust_for(Keycode::Space), None);
    }
}
