//! Panelink Serial Protocol
//!
//! This crate defines the text lines exchanged between a panel node and
//! whatever listens on the other end of its serial port (another node or a
//! host process). There is no framing beyond the line terminator, and no
//! acknowledgement or retry: a node writes a line and forgets about it.
//!
//! # Line Formats
//!
//! ```text
//! {"action": "button_down", "name": "arduino_1"}\r\n
//! {"action": "button_up", "name": "arduino_1"}\r\n
//! Time on device arduino_1 is 42000\r\n
//! ```
//!
//! Node names are validated up front (see [`ComponentName`]) so encoding
//! never needs to escape anything.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod decode;
pub mod line;
pub mod message;
pub mod name;

pub use decode::{DecodeError, Message};
pub use line::{LineError, LineReader, MAX_LINE_LEN};
pub use message::{Action, EncodeError, HeartbeatMessage, Line, Notification, LINE_TERMINATOR};
pub use name::{ComponentName, NameError, MAX_NAME_LEN};
