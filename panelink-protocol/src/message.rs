//! Outgoing message types and their line encoding

use core::fmt::{self, Write};

use heapless::String;

use crate::line::MAX_LINE_LEN;
use crate::name::ComponentName;

/// Terminator written after every line on the wire
pub const LINE_TERMINATOR: &str = "\r\n";

/// A single encoded line, without terminator
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while encoding a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Encoded line does not fit the output buffer
    BufferTooSmall,
}

impl From<fmt::Error> for EncodeError {
    fn from(_: fmt::Error) -> Self {
        EncodeError::BufferTooSmall
    }
}

/// Button action carried by a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Button went from released to pressed
    ButtonDown,
    /// Button went from pressed to released
    ButtonUp,
}

// Wire format values
const ACTION_BUTTON_DOWN: &str = "button_down";
const ACTION_BUTTON_UP: &str = "button_up";

impl Action {
    /// Parse an action from its wire name
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            ACTION_BUTTON_DOWN => Some(Action::ButtonDown),
            ACTION_BUTTON_UP => Some(Action::ButtonUp),
            _ => None,
        }
    }

    /// Wire name of this action
    pub fn as_wire(self) -> &'static str {
        match self {
            Action::ButtonDown => ACTION_BUTTON_DOWN,
            Action::ButtonUp => ACTION_BUTTON_UP,
        }
    }
}

/// Button edge notification
///
/// Encodes as `{"action": "button_down", "name": "arduino_1"}`, with exactly
/// this key order and spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    pub action: Action,
    pub name: ComponentName,
}

impl Notification {
    pub fn new(action: Action, name: ComponentName) -> Self {
        Self { action, name }
    }

    /// Write the notification (without terminator) into any formatter
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{{\"action\": \"{}\", \"name\": \"{}\"}}",
            self.action.as_wire(),
            self.name
        )
    }

    /// Encode into a fresh line buffer
    pub fn encode(&self) -> Result<Line, EncodeError> {
        let mut line = Line::new();
        self.write_to(&mut line)?;
        Ok(line)
    }
}

/// Periodic uptime report from a node
///
/// Encodes as `Time on device arduino_1 is 42000`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeartbeatMessage {
    pub device: ComponentName,
    /// Node uptime in milliseconds
    pub uptime_ms: u32,
}

pub(crate) const HEARTBEAT_PREFIX: &str = "Time on device ";
pub(crate) const HEARTBEAT_INFIX: &str = " is ";

impl HeartbeatMessage {
    pub fn new(device: ComponentName, uptime_ms: u32) -> Self {
        Self { device, uptime_ms }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{}{}{}{}",
            HEARTBEAT_PREFIX, self.device, HEARTBEAT_INFIX, self.uptime_ms
        )
    }

    pub fn encode(&self) -> Result<Line, EncodeError> {
        let mut line = Line::new();
        self.write_to(&mut line)?;
        Ok(line)
    }
}
