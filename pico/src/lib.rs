//! Rainwatch firmware library - the host-testable half of the RP2040 firmware.
//!
//! This library holds the sampler, the four consumers and the SSD1306 driver,
//! all written against the hardware seams in [`hal`]. The binary (`main.rs`)
//! binds those seams to embassy-rp peripherals and spawns the tasks.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p rainwatch-pico --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// The seams are only implemented inside this workspace
#![allow(async_fn_in_trait)]

#[macro_use]
mod logging;

pub mod config;
pub mod consumers;
pub mod drivers;
pub mod hal;
pub mod sampler;

#[cfg(test)]
mod fakes;
#[cfg(test)]
mod scenarios;

pub use consumers::{AlarmConsumer, Consumer, DisplayConsumer, IndicatorConsumer, MatrixConsumer};
pub use sampler::Sampler;
