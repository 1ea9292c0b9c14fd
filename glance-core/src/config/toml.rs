//! Simple TOML reader for detector configuration
//!
//! This is a minimal line-based parser that handles only the subset needed
//! for glance configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - [section] and [section.subsection] headers
//! - Inline tables for axis ranges: x = { start = -400, end = 400 }
//! - Underscore digit separators (5_000)
//! - Comments (# ...)
//!
//! Keys that are not present keep their [`GlanceConfig::default`] value.

use heapless::String as HString;

use super::types::GlanceConfig;
use crate::zone::{AxisRange, Zone};

/// Longest numeric literal accepted (after removing separators)
const MAX_NUMBER_LEN: usize = 16;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Unknown key, or a line that is not `key = value`
    InvalidKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Which named zone a `[zones.*]` section refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneKind {
    Active,
    InactiveDownward,
    InactiveAway,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sampling,
    Windows,
    Zone(ZoneKind),
}

/// Parse TOML configuration into GlanceConfig
///
/// The result is not validated; call [`GlanceConfig::validate`] afterwards.
pub fn parse_config(input: &str) -> Result<GlanceConfig, ParseError> {
    let mut config = GlanceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidKey)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Drop everything after a `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parse section header like "windows" or "zones.active"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sampling" => Ok(Section::Sampling),
        "windows" => Ok(Section::Windows),
        "zones.active" => Ok(Section::Zone(ZoneKind::Active)),
        "zones.inactive_downward" => Ok(Section::Zone(ZoneKind::InactiveDownward)),
        "zones.inactive_away" => Ok(Section::Zone(ZoneKind::InactiveAway)),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value` at the first `=`
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut GlanceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "version" => config.version = parse_number(value)?,
            "timeout_ms" => config.timeout_ms = parse_number(value)?,
            "control_backlight" => config.control_backlight = parse_bool(value)?,
            "legacy_flick_backlight" => config.legacy_flick_backlight = parse_bool(value)?,
            _ => return Err(ParseError::InvalidKey),
        },
        Section::Sampling => match key {
            "batch_size" => config.sampling.batch_size = parse_number(value)?,
            "rate_hz" => config.sampling.rate_hz = parse_number(value)?,
            _ => return Err(ParseError::InvalidKey),
        },
        Section::Windows => match key {
            "downward_ms" => config.windows.downward_ms = parse_number(value)?,
            "away_ms" => config.windows.away_ms = parse_number(value)?,
            "roll_ms" => config.windows.roll_ms = parse_number(value)?,
            "light_fade_ms" => config.windows.light_fade_ms = parse_number(value)?,
            _ => return Err(ParseError::InvalidKey),
        },
        Section::Zone(kind) => {
            let zone: &mut Zone = match kind {
                ZoneKind::Active => &mut config.zones.active,
                ZoneKind::InactiveDownward => &mut config.zones.inactive_downward,
                ZoneKind::InactiveAway => &mut config.zones.inactive_away,
            };
            match key {
                "x" => zone.x = parse_range(value)?,
                "y" => zone.y = parse_range(value)?,
                "z" => zone.z = parse_range(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse an integer literal into any integer type it fits
fn parse_number<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let mut digits: HString<MAX_NUMBER_LEN> = HString::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }

    let n: i64 = digits.parse().map_err(|_| ParseError::InvalidValue)?;
    T::try_from(n).map_err(|_| ParseError::InvalidValue)
}

/// Parse an inline `{ start = a, end = b }` table
fn parse_range(value: &str) -> Result<AxisRange, ParseError> {
    let inner = value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .ok_or(ParseError::InvalidValue)?;

    let mut start = None;
    let mut end = None;

    for part in inner.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (k, v) = parse_key_value(part).ok_or(ParseError::InvalidValue)?;
        match k {
            "start" => start = Some(parse_number(v)?),
            "end" => end = Some(parse_number(v)?),
            _ => return Err(ParseError::InvalidKey),
        }
    }

    match (start, end) {
        (Some(start), Some(end)) => Ok(AxisRange::new(start, end)),
        _ => Err(ParseError::InvalidValue),
    }
}
