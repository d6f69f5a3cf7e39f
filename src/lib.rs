//! # Time-of-Flight Distance Heatmap
//!
//! Polls a VL53L5CX multizone time-of-flight sensor and draws its 4x4 or 8x8
//! distance grid as a false-color heatmap on any `embedded-graphics` display.
//!
//! ```text
//!   RangingSensor ──► RangingFrame ──► Heatmap ──► HeatmapRenderer ──► DrawTarget
//!     (driver)         (per zone)      (0..=255)     (GridLayout)        (LCD)
//! ```
//!
//! Near readings are bright and far readings dark. With the default
//! [`Palette::Red`](config::Palette::Red) a zone at 0 mm is full red and a
//! zone at or beyond 750 mm is black.
//!
//! The library is `no_std` and board-independent. The firmware for the
//! Raspberry Pi Pico 2 lives in `src/main.rs` and needs the `board` feature.
//!
//! ## Features
//!
//! - `defmt`: log through `defmt`. Without it, log calls compile to nothing.
//! - `vl53l5cx`: [`RangingSensor`](sensor::RangingSensor) for the VL53L5CX
//!   driver crate.
//! - `board`: everything the RP2350 firmware binary needs.

#![cfg_attr(not(test), no_std)]

mod fmt; // must come first so the log macros are visible below

pub mod app;
pub mod config;
pub mod error;
pub mod frame;
pub mod heatmap;
pub mod layout;
pub mod render;
pub mod sensor;
#[cfg(feature = "vl53l5cx")]
pub mod vl53l5cx;

pub use app::{FrameSummary, HeatmapApp};
pub use config::{AppConfig, ConfigError, Palette, Resolution};
pub use error::Error;
pub use frame::RangingFrame;
pub use sensor::RangingSensor;
