//! Configuration types
//!
//! Board-agnostic detector configuration and a small `no_std` TOML reader
//! for the embedded config file.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
