//! Line reassembly for incoming serial bytes
//!
//! Bytes are fed one at a time as they arrive from the UART. A line ends at
//! `\n`; a `\r` immediately before it is dropped so both `println`-style
//! `\r\n` and bare `\n` terminators work. A `\r` is held back until the
//! next byte shows whether it belongs to the terminator, so it never counts
//! against the line length.

use heapless::String;

/// Maximum line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 96;

/// Errors reported by the line reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the rest of it will be discarded
    Overflow,
    /// Line contained bytes that are not valid UTF-8
    InvalidUtf8,
}

/// State machine that turns a byte stream into lines
#[derive(Debug, Clone)]
pub struct LineReader {
    buffer: heapless::Vec<u8, MAX_LINE_LEN>,
    /// A `\r` was seen and not yet placed in the buffer
    pending_cr: bool,
    /// Set after an overflow until the next newline
    discarding: bool,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
            pending_cr: false,
            discarding: false,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending_cr = false;
        self.discarding = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a newline completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` once per bad line.
    /// Empty lines are skipped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        if byte == b'\n' {
            if self.discarding {
                self.reset();
                return Ok(None);
            }

            // Terminator: a held `\r` is dropped
            self.pending_cr = false;
            if self.buffer.is_empty() {
                return Ok(None);
            }

            let bytes = core::mem::take(&mut self.buffer);
            return String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| LineError::InvalidUtf8);
        }

        if self.discarding {
            return Ok(None);
        }

        // The held `\r` was not part of a terminator
        if core::mem::replace(&mut self.pending_cr, false) {
            self.push(b'\r')?;
        }

        if byte == b'\r' {
            self.pending_cr = true;
            return Ok(None);
        }

        self.push(byte)?;
        Ok(None)
    }

    fn push(&mut self, byte: u8) -> Result<(), LineError> {
        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.pending_cr = false;
            self.discarding = true;
            return Err(LineError::Overflow);
        }
        Ok(())
    }
}
