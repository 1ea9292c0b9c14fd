//! Board-agnostic glance detection logic
//!
//! This crate contains everything that decides whether the wearer is
//! looking at the watch, without depending on a specific board:
//!
//! - Zone geometry and sample classification
//! - Glance state machine and its events
//! - Hysteresis windows and the glance timeout
//! - The engine that consumes accelerometer batches, taps and timers
//! - Platform capability traits (clock, timers, backlight, haptics, feeds)
//! - Configuration types and a small TOML reader

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod sensor;
pub mod state;
pub mod timing;
pub mod traits;
pub mod zone;
