//! Common types and logic for the rainfall / water-level monitor.
//!
//! This crate contains the platform-agnostic half of the system, shared between
//! the RP2040 firmware and the desktop simulator:
//!
//! - [`thresholds`]: Raw-count and percentage threshold tables
//! - [`sample`]: Sensor samples, normalization and quantization
//! - [`severity`]: Severity levels and the classifier
//! - [`indicator`]: Bicolor indicator brightness mapping
//! - [`matrix`]: LED matrix patterns and the animator state machine
//! - [`alarm`]: Alarm patterns and square-wave tone timing
//! - [`layout`]: Panel geometry and bar-graph coordinates
//! - [`render`]: Bar-graph view and alert overlays drawn with `embedded-graphics`
//! - [`bus`]: Latest-value fan-out from the sampler to every consumer
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests. Enable the `defmt` feature to derive
//! `defmt::Format` on the public types.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alarm;
pub mod bus;
pub mod indicator;
pub mod layout;
pub mod matrix;
pub mod render;
pub mod sample;
pub mod severity;
pub mod thresholds;

// Re-export commonly used items
pub use sample::{NormalizedSample, QuantizedPercent, SensorSample};
pub use severity::{Classification, Severity, classify};
