//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::AtomicU32;

use panelink_protocol::Line;

/// Channel capacity for outgoing lines
const LINE_CHANNEL_SIZE: usize = 8;

/// Outgoing lines waiting for the serial TX task (no terminator)
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> =
    Channel::new();

/// Lines dropped because the channel was full
pub static DROPPED_LINES: AtomicU32 = AtomicU32::new(0);
