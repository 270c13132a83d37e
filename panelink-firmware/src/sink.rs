//! Channel-backed line sink
//!
//! Producers (button, heartbeat) never block on the UART. Lines are queued
//! for the serial TX task, and dropped when the queue is full.

use core::sync::atomic::Ordering;

use defmt::Format;
use panelink_core::traits::Sink;
use panelink_protocol::Line;

use crate::channels::{DROPPED_LINES, LINE_CHANNEL};

/// Errors from queueing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum SinkError {
    /// TX queue full, line dropped
    QueueFull,
    /// Line longer than the queue's line buffer
    LineTooLong,
}

/// Sink that queues lines for `serial_tx_task`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelSink;

impl Sink for ChannelSink {
    type Error = SinkError;

    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        let mut queued = Line::new();
        queued
            .push_str(line)
            .map_err(|_| SinkError::LineTooLong)?;

        LINE_CHANNEL.try_send(queued).map_err(|_| {
            DROPPED_LINES.fetch_add(1, Ordering::Relaxed);
            SinkError::QueueFull
        })
    }
}
