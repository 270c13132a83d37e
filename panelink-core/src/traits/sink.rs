//! Line-oriented output sink

/// Destination for outgoing text lines (serial port, queue, log)
///
/// Writes are fire-and-forget from the caller's point of view: there is no
/// acknowledgement and the core never retries. Errors are returned only so
/// the caller can log them.
pub trait Sink {
    /// Error type for write operations
    type Error;

    /// Write one line. The line does not include a terminator; the sink
    /// appends whatever its transport needs.
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Error = S::Error;

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        (**self).write_line(line)
    }
}
