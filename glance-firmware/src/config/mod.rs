//! Configuration loading
//!
//! The detector configuration is compiled in from glance.toml and read
//! with the no_std reader from glance-core.

pub mod loader;

pub use loader::load_config;
