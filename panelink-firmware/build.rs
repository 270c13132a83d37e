//! Build script for panelink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates node.toml at compile time, both as TOML and with the
//!   runtime parser the firmware uses
//! - Validates the PANELINK_NODE_NAME override

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Must match panelink_protocol::MAX_NAME_LEN
const MAX_NAME_LEN: usize = 16;

/// Must match panelink_core::config::GPIO_COUNT
const GPIO_COUNT: u64 = 30;

/// GPIOs taken by the UART0 serial link
const UART_PINS: [u64; 2] = [0, 1];

fn main() {
    setup_linker();
    validate_config();
    validate_name_override();
}

/// Set up linker search paths for memory.x
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

/// Validate node.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: node.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a node.toml configuration file.           ║\n\
            ║  Please create one in the panelink-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read node.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in node.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_node(&config, &mut errors);
    validate_button(&config, &mut errors);
    validate_heartbeat(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid node.toml configuration", &errors);
    }

    // The firmware parser only reads a subset of TOML (double-quoted strings,
    // decimal integers, plain keys, no inline tables)
    if let Err(e) = panelink_core::config::parse_node_config(&config_content) {
        fail(
            "node.toml uses syntax the firmware cannot read",
            &[
                format!("runtime parser error: {:?}", e),
                "use \"double quotes\", decimal numbers, plain keys".to_string(),
            ],
        );
    }

    println!("cargo:warning=node.toml validated successfully");
}

/// Validate the build-time node name override, if any
fn validate_name_override() {
    println!("cargo:rerun-if-env-changed=PANELINK_NODE_NAME");

    if let Ok(name) = env::var("PANELINK_NODE_NAME") {
        if let Some(err) = check_name(&name) {
            fail("Invalid PANELINK_NODE_NAME", &[err]);
        }
        println!("cargo:warning=node name overridden: {}", name);
    }
}

/// Only known sections and keys are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("node.toml must be a table".to_string());
        return;
    };

    for (section, value) in root {
        let allowed: &[&str] = match section.as_str() {
            "node" => &["name", "baudrate"],
            "button" => &["pin", "debounce_ms"],
            "heartbeat" => &["interval_ms"],
            _ => {
                errors.push(format!("unknown section [{}]", section));
                continue;
            }
        };

        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for key in table.keys() {
            if !allowed.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn validate_node(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(node) = config.get("node") else {
        errors.push("missing [node] section".to_string());
        return;
    };

    match node.get("name") {
        Some(toml::Value::String(name)) => {
            if let Some(err) = check_name(name) {
                errors.push(format!("[node] {}", err));
            }
        }
        Some(_) => errors.push("[node] name must be a string".to_string()),
        None => errors.push("[node] missing 'name'".to_string()),
    }

    check_positive(node, "node", "baudrate", errors);
}

fn validate_button(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(button) = config.get("button") else {
        return;
    };

    match button.get("pin") {
        Some(toml::Value::String(pin)) => match parse_pin_number(pin) {
            Some(n) if UART_PINS.contains(&n) => {
                errors.push(format!("[button] gpio{} is used by the serial link", n))
            }
            Some(_) => {}
            None => errors.push(format!(
                "[button] pin '{}' must look like \"gpioN\", \"!gpioN\" or \"^!gpioN\" (N < {})",
                pin, GPIO_COUNT
            )),
        },
        Some(_) => errors.push("[button] pin must be a string".to_string()),
        None => {}
    }

    if let Some(value) = button.get("debounce_ms") {
        match value.as_integer() {
            Some(ms) if (0..=1000).contains(&ms) => {}
            _ => errors.push("[button] debounce_ms must be 0-1000".to_string()),
        }
    }
}

fn validate_heartbeat(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(heartbeat) = config.get("heartbeat") {
        check_positive(heartbeat, "heartbeat", "interval_ms", errors);
    }
}

fn check_positive(table: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = table.get(key) {
        match value.as_integer() {
            Some(v) if v > 0 && v <= u32::MAX as i64 => {}
            _ => errors.push(format!("[{}] {} must be a positive 32-bit integer", section, key)),
        }
    }
}

fn check_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Some(format!("name '{}' is longer than {} bytes", name, MAX_NAME_LEN));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        return Some(format!("name '{}' may only contain A-Z a-z 0-9 _ -", name));
    }
    None
}

fn parse_pin_number(pin: &str) -> Option<u64> {
    let num = pin.trim_start_matches(['!', '^']).strip_prefix("gpio")?;
    if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    num.parse().ok().filter(|n| *n < GPIO_COUNT)
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
