//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in glance-core for the parts found on a wrist device:
//!
//! - LIS3DH-class accelerometer (FIFO batches and click detection)
//! - GPIO backlight with interactive hold
//! - Vibration motor with timed patterns

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod output;
pub mod sensor;
