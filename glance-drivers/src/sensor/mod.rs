//! Accelerometer drivers

pub mod lis3dh;

pub use lis3dh::{AccelError, Lis3dh, Lis3dhConfig};
