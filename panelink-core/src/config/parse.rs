//! Parser for `node.toml`
//!
//! This is a minimal TOML parser that handles only the subset needed for a
//! node configuration. It does NOT support the full TOML spec and never
//! allocates.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Recognized layout:
//!
//! ```toml
//! [node]
//! name = "arduino_1"
//! baudrate = 19200
//!
//! [button]
//! pin = "^!gpio8"
//! debounce_ms = 20
//!
//! [heartbeat]
//! interval_ms = 2000
//! ```

use panelink_protocol::ComponentName;

use super::types::{ButtonConfig, HeartbeatConfig, NodeConfig, PinConfig, DEFAULT_BAUDRATE, GPIO_COUNT};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Unknown key, or a line that is not `key = value`
    InvalidKey,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Node name fails validation
    InvalidName,
    /// `[node].name` not set
    MissingName,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Node,
    Button,
    Heartbeat,
}

/// Parse TOML configuration into NodeConfig
pub fn parse_node_config(input: &str) -> Result<NodeConfig, ParseError> {
    let mut section = Section::Root;

    let mut name: Option<ComponentName> = None;
    let mut baudrate = DEFAULT_BAUDRATE;
    let mut button = ButtonConfig::default();
    let mut heartbeat: Option<HeartbeatConfig> = None;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            if section == Section::Heartbeat {
                // Section presence enables the heartbeat
                heartbeat.get_or_insert_with(HeartbeatConfig::default);
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidKey)?;

        match (section, key) {
            (Section::Node, "name") => {
                let value = parse_string(value)?;
                name = Some(ComponentName::new(value).map_err(|_| ParseError::InvalidName)?);
            }
            (Section::Node, "baudrate") => baudrate = parse_int(value)?,
            (Section::Button, "pin") => button.pin = parse_pin(value)?,
            (Section::Button, "debounce_ms") => button.debounce_ms = parse_int(value)?,
            (Section::Heartbeat, "interval_ms") => {
                heartbeat.get_or_insert_with(HeartbeatConfig::default).interval_ms =
                    parse_int(value)?
            }
            _ => return Err(ParseError::InvalidKey),
        }
    }

    Ok(NodeConfig {
        name: name.ok_or(ParseError::MissingName)?,
        baudrate,
        button,
        heartbeat,
    })
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "node" => Ok(Section::Node),
        "button" => Ok(Section::Button),
        "heartbeat" => Ok(Section::Heartbeat),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;

    for c in value.chars() {
        match c {
            '_' => continue,
            '0'..='9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(c as u32 - '0' as u32))
                    .ok_or(ParseError::InvalidValue)?;
                digits += 1;
            }
            _ => return Err(ParseError::InvalidValue),
        }
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

/// Parse a pin string like "gpio8", "!gpio8" or "^!gpio8"
///
/// `!` marks the pin active-low, `^` enables the internal pull-up. Modifiers
/// may appear in any order.
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value).unwrap_or(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPin);
    }
    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin >= GPIO_COUNT {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::DEFAULT_DEBOUNCE_MS;

    const FULL: &str = r#"
# Panel node
[node]
name = "arduino_2"   # board identity
baudrate = 115_200

[button]
pin = "^!gpio8"
debounce_ms = 30

[heartbeat]
interval_ms = 5000
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_node_config(FULL).unwrap();
        assert_eq!(config.name.as_str(), "arduino_2");
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.button.pin, PinConfig::active_low_pullup(8));
        assert_eq!(config.button.debounce_ms, 30);
        assert_eq!(config.heartbeat, Some(HeartbeatConfig { interval_ms: 5000 }));
    }

    #[test]
    fn test_defaults_apply() {
        let config = parse_node_config("[node]\nname = \"arduino_1\"\n").unwrap();
        assert_eq!(config.baudrate, 19200);
        assert_eq!(config.button.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.heartbeat, None);
    }

    #[test]
    fn test_empty_heartbeat_section_enables_default() {
        let config = parse_node_config("[node]\nname = \"a\"\n[heartbeat]\n").unwrap();
        assert_eq!(config.heartbeat, Some(HeartbeatConfig::default()));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_node_config(""), Err(ParseError::MissingName));
        assert_eq!(
            parse_node_config("[motor]\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_node_config("[node]\ncolour = \"red\"\n"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(
            parse_node_config("name = \"root\"\n"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"bad name\"\n"),
            Err(ParseError::InvalidName)
        );
        assert_eq!(
            parse_node_config("[node]\nname = arduino\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"a\"\nbaudrate = fast\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_node_config("[node]\njust some words\n"),
            Err(ParseError::InvalidKey)
        );
    }

    #[test]
    fn test_rejects_toml_outside_subset() {
        // Valid TOML that the firmware does not read; build.rs relies on
        // these failing so such files never reach a board
        assert_eq!(
            parse_node_config("[node]\nname = 'arduino_2'\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"a\"\nbaudrate = 0x4B00\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"a\"\nbaudrate = 1.92e4\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_node_config("node.name = \"arduino_2\"\n"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"a\"\n[button]\nbutton.pin = \"gpio3\"\n"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(
            parse_node_config("node = { name = \"arduino_2\" }\n"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"a\"\n[button]\npin = { gpio = 3 }\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_node_config("[node]\nname = \"\"\"arduino_2\"\"\"\n"),
            Err(ParseError::InvalidName)
        );
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("\"gpio8\""), Ok(PinConfig::new(8)));
        assert_eq!(
            parse_pin("\"!gpio12\""),
            Ok(PinConfig { pin: 12, inverted: true, pull_up: false })
        );
        assert_eq!(parse_pin("\"!^gpio4\""), Ok(PinConfig::active_low_pullup(4)));
        assert_eq!(parse_pin("gpio29"), Ok(PinConfig::new(29)));

        assert_eq!(parse_pin("\"gpio30\""), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("\"pin11\""), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("\"gpio\""), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("\"gpio+1\""), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_hash_inside_string_kept() {
        assert_eq!(strip_comment("name = \"a#b\" # note"), "name = \"a#b\" ");
    }

    #[test]
    fn test_parse_int_overflow() {
        assert_eq!(parse_int("4294967296"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int("4_294_967_295"), Ok(u32::MAX));
    }
}
