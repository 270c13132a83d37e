//! Monotonic time source

/// Monotonic millisecond clock
///
/// The counter is 32 bits and wraps after ~49.7 days. Consumers compare
/// timestamps with `wrapping_sub`, so wrap-around is harmless as long as
/// the intervals being measured are shorter than that.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (usually boot)
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
