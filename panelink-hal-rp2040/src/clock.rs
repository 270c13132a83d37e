//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;
use panelink_core::traits::Clock;

/// Clock reading the embassy uptime counter
///
/// Truncates to 32 bits, so it wraps like an Arduino `millis()` counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
