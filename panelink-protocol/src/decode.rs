//! Decoding of received lines
//!
//! The receiving side of a link sees notifications and heartbeats mixed on
//! one stream. Notifications are JSON objects decoded with `serde-json-core`:
//! key order and whitespace are free, escapes are resolved, and unknown keys
//! are ignored.

use heapless::String;
use serde::Deserialize;

use crate::line::MAX_LINE_LEN;
use crate::message::{Action, HeartbeatMessage, Notification, HEARTBEAT_INFIX, HEARTBEAT_PREFIX};
use crate::name::ComponentName;

/// Errors that can occur while decoding a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Line starts like JSON but is malformed
    InvalidJson,
    /// Required key (`action` or `name`) is absent
    MissingField,
    /// `action` value is not a known action
    UnknownAction,
    /// Name is empty, too long or has invalid characters
    InvalidName,
    /// Heartbeat line with a non-numeric uptime
    InvalidUptime,
    /// Line matches no known message
    Unrecognized,
}

/// Any message that can appear on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    Notification(Notification),
    Heartbeat(HeartbeatMessage),
}

impl Message {
    /// Classify and decode a single line (terminator already stripped)
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        let line = line.trim();

        if line.starts_with('{') {
            return parse_notification(line).map(Message::Notification);
        }
        if let Some(rest) = line.strip_prefix(HEARTBEAT_PREFIX) {
            return parse_heartbeat(rest).map(Message::Heartbeat);
        }

        Err(DecodeError::Unrecognized)
    }
}

/// Notification object as it appears on the wire
///
/// Both fields are optional here so a missing key surfaces as
/// [`DecodeError::MissingField`] rather than a generic JSON error. Values
/// are held whole and validated afterwards.
#[derive(Deserialize)]
struct WireNotification {
    #[serde(default)]
    action: Option<String<MAX_LINE_LEN>>,
    #[serde(default)]
    name: Option<String<MAX_LINE_LEN>>,
}

fn parse_notification(line: &str) -> Result<Notification, DecodeError> {
    // Unescaped strings are never longer than their escaped form
    let mut scratch = [0u8; MAX_LINE_LEN];
    let (wire, _): (WireNotification, usize) =
        serde_json_core::from_str_escaped(line, &mut scratch)
            .map_err(|_| DecodeError::InvalidJson)?;

    let action = wire.action.ok_or(DecodeError::MissingField)?;
    let name = wire.name.ok_or(DecodeError::MissingField)?;

    let action = Action::from_wire(&action).ok_or(DecodeError::UnknownAction)?;
    let name = ComponentName::new(&name).map_err(|_| DecodeError::InvalidName)?;

    Ok(Notification::new(action, name))
}

fn parse_heartbeat(rest: &str) -> Result<HeartbeatMessage, DecodeError> {
    let split = rest.rfind(HEARTBEAT_INFIX).ok_or(DecodeError::Unrecognized)?;
    let device = &rest[..split];
    let uptime = &rest[split + HEARTBEAT_INFIX.len()..];

    let device = ComponentName::new(device).map_err(|_| DecodeError::InvalidName)?;
    let uptime_ms = uptime
        .trim()
        .parse::<u32>()
        .map_err(|_| DecodeError::InvalidUptime)?;

    Ok(HeartbeatMessage::new(device, uptime_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn name(s: &str) -> ComponentName {
        ComponentName::new(s).unwrap()
    }

    #[test]
    fn test_parse_button_down() {
        let msg = Message::parse(r#"{"action": "button_down", "name": "arduino_2"}"#).unwrap();
        assert_eq!(
            msg,
            Message::Notification(Notification::new(Action::ButtonDown, name("arduino_2")))
        );
    }

    #[test]
    fn test_parse_any_key_order_and_spacing() {
        let msg = Message::parse(r#"{"name":"arduino_1","action":"button_up"}"#).unwrap();
        assert_eq!(
            msg,
            Message::Notification(Notification::new(Action::ButtonUp, name("arduino_1")))
        );
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let msg = Message::parse(
            r#"{"action": "button_up", "value": 1, "name": "key", "loop": false}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            Message::Notification(Notification::new(Action::ButtonUp, name("key")))
        );
    }

    #[test]
    fn test_parse_resolves_escapes() {
        let msg =
            Message::parse(r#"{"action": "button\u005fdown", "name": "arduino\u005f1"}"#).unwrap();
        assert_eq!(
            msg,
            Message::Notification(Notification::new(Action::ButtonDown, name("arduino_1")))
        );

        // An escaped quote is part of the value, not the end of it
        assert_eq!(
            Message::parse(r#"{"action": "button_up", "name": "a\"b"}"#),
            Err(DecodeError::InvalidName)
        );
    }

    #[test]
    fn test_parse_heartbeat() {
        let msg = Message::parse("Time on device arduino_2 is 5001").unwrap();
        assert_eq!(
            msg,
            Message::Heartbeat(HeartbeatMessage::new(name("arduino_2"), 5001))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Message::parse(r#"{"action": "button_down""#),
            Err(DecodeError::InvalidJson)
        );
        assert_eq!(
            Message::parse(r#"{"action": "button_down"}"#),
            Err(DecodeError::MissingField)
        );
        assert_eq!(
            Message::parse(r#"{"action": "switch", "name": "a"}"#),
            Err(DecodeError::UnknownAction)
        );
        assert_eq!(
            Message::parse(r#"{"action": "button_up", "name": "bad name"}"#),
            Err(DecodeError::InvalidName)
        );
        assert_eq!(
            Message::parse(r#"{"action": "button_up", "name": "a"} trailing"#),
            Err(DecodeError::InvalidJson)
        );
        assert_eq!(
            Message::parse("Time on device arduino_2 is soon"),
            Err(DecodeError::InvalidUptime)
        );
        assert_eq!(Message::parse("hello"), Err(DecodeError::Unrecognized));
        assert_eq!(Message::parse("{}"), Err(DecodeError::MissingField));
    }

    proptest! {
        #[test]
        fn prop_notification_encode_decode(
            down in any::<bool>(),
            raw_name in "[A-Za-z0-9_-]{1,16}",
        ) {
            let action = if down { Action::ButtonDown } else { Action::ButtonUp };
            let n = Notification::new(action, ComponentName::new(&raw_name).unwrap());
            let line = n.encode().unwrap();
            prop_assert_eq!(Message::parse(&line), Ok(Message::Notification(n)));
        }

        #[test]
        fn prop_parse_never_panics(line in "\\PC{0,80}") {
            let _ = Message::parse(&line);
        }
    }
}
