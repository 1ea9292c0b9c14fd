//! Build script for glance-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates glance.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use glance_core::config::{parse_config, GlanceConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate glance.toml at compile time
///
/// The file is checked three ways: TOML syntax, the typed config (via
/// serde), and the on-target reader, which must produce the same config.
fn validate_config() {
    // Re-run if glance.toml changes
    println!("cargo:rerun-if-changed=glance.toml");

    let config_path = Path::new("glance.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: glance.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds glance.toml as its detector configuration.  ║\n\
            ║  Please create one in the glance-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read glance.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in glance.toml", &[e.to_string()]),
    };

    validate_sections(&value);

    // Typed view of the same file
    let typed: GlanceConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => fail("Invalid value in glance.toml", &[e.to_string()]),
    };

    if let Err(e) = typed.validate() {
        fail(
            "Invalid glance configuration",
            &[format!("validation failed: {:?}", e)],
        );
    }

    // The firmware reads the file with its own no_std reader
    match parse_config(&config_content) {
        Ok(parsed) if parsed == typed => {}
        Ok(_) => fail(
            "glance.toml is read differently on target",
            &["the embedded reader disagrees with the typed config".to_string()],
        ),
        Err(e) => fail(
            "glance.toml uses syntax the firmware cannot read",
            &[format!("embedded reader error: {:?}", e)],
        ),
    }

    println!("cargo:warning=glance.toml validated successfully");
}

/// Check for unknown sections and keys
fn validate_sections(config: &toml::Value) {
    const ROOT_KEYS: &[&str] = &[
        "version",
        "timeout_ms",
        "control_backlight",
        "legacy_flick_backlight",
        "sampling",
        "windows",
        "zones",
    ];
    const ZONES: &[&str] = &["active", "inactive_downward", "inactive_away"];
    const AXES: &[&str] = &["x", "y", "z"];

    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => fail("glance.toml must be a table", &[]),
    };

    for key in root.keys() {
        if !ROOT_KEYS.contains(&key.as_str()) {
            errors.push(format!("unknown key '{}'", key));
        }
    }

    if let Some(zones) = root.get("zones") {
        match zones.as_table() {
            Some(zones) => {
                for (name, zone) in zones {
                    if !ZONES.contains(&name.as_str()) {
                        errors.push(format!("unknown zone [zones.{}]", name));
                        continue;
                    }
                    let Some(zone) = zone.as_table() else {
                        errors.push(format!("[zones.{}] must be a table", name));
                        continue;
                    };
                    for (axis, range) in zone {
                        if !AXES.contains(&axis.as_str()) {
                            errors.push(format!("[zones.{}] unknown axis '{}'", name, axis));
                        } else if range.as_table().is_none() {
                            errors.push(format!(
                                "[zones.{}] {} must be {{ start = .., end = .. }}",
                                name, axis
                            ));
                        }
                    }
                }
            }
            None => errors.push("[zones] must be a table".to_string()),
        }
    }

    if let Some(toml::Value::Integer(hz)) = root.get("sampling").and_then(|s| s.get("rate_hz")) {
        if *hz <= 0 || *hz > 400 {
            errors.push("[sampling] rate_hz must be 1-400".to_string());
        }
    }

    if !errors.is_empty() {
        fail("Invalid sections in glance.toml", &errors);
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .flat_map(|l| l.lines())
            .map(format_error_line)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Format one error line with box drawing
fn format_error_line(line: &str) -> String {
    let truncated = if line.len() > 62 {
        format!("{}...", &line[..59])
    } else {
        line.to_string()
    };
    format!("║  • {:<62} ║", truncated)
}
