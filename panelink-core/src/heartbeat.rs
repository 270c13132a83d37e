//! Periodic uptime heartbeat
//!
//! Lets whoever is listening on the serial line confirm the link is alive
//! even while no buttons are pressed.

use panelink_protocol::{ComponentName, HeartbeatMessage};

/// Default heartbeat interval in milliseconds
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u32 = 2000;

/// Heartbeat timer for one node
#[derive(Debug, Clone)]
pub struct Heartbeat {
    device: ComponentName,
    interval_ms: u32,
    last_beat_ms: u32,
}

impl Heartbeat {
    /// Create a heartbeat whose first interval starts at `start_ms`
    pub fn new(device: ComponentName, interval_ms: u32, start_ms: u32) -> Self {
        Self {
            device,
            interval_ms,
            last_beat_ms: start_ms,
        }
    }

    /// Check the timer
    ///
    /// Fires once strictly more than `interval_ms` has passed since the last
    /// beat; the next interval is then measured from `now_ms`.
    pub fn poll(&mut self, now_ms: u32) -> Option<HeartbeatMessage> {
        if now_ms.wrapping_sub(self.last_beat_ms) <= self.interval_ms {
            return None;
        }

        self.last_beat_ms = now_ms;
        Some(HeartbeatMessage::new(self.device.clone(), now_ms))
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heartbeat(interval_ms: u32) -> Heartbeat {
        Heartbeat::new(ComponentName::new("arduino_2").unwrap(), interval_ms, 0)
    }

    #[test]
    fn test_fires_after_interval() {
        let mut hb = heartbeat(2000);
        assert!(hb.poll(1000).is_none());
        assert!(hb.poll(2000).is_none()); // not strictly greater yet

        let msg = hb.poll(2001).unwrap();
        assert_eq!(msg.uptime_ms, 2001);
        assert_eq!(msg.device.as_str(), "arduino_2");
    }

    #[test]
    fn test_interval_restarts_from_beat() {
        let mut hb = heartbeat(5000);
        assert!(hb.poll(5500).is_some());
        assert!(hb.poll(10_000).is_none());
        assert!(hb.poll(10_500).is_none());
        assert!(hb.poll(10_501).is_some());
    }

    #[test]
    fn test_beat_count_over_time() {
        let mut hb = heartbeat(2000);
        let beats = (0..10_000).filter(|&t| hb.poll(t).is_some()).count();
        // Beats at 2001, 4002, 6003, 8004
        assert_eq!(beats, 4);
    }
}
