//! Heartbeat task
//!
//! Queues a "time on device" line whenever the heartbeat interval elapses.

use defmt::*;
use embassy_time::{Duration, Ticker};

use panelink_core::heartbeat::Heartbeat;
use panelink_core::traits::{Clock, Sink};
use panelink_hal_rp2040::EmbassyClock;

use crate::sink::ChannelSink;

/// How often the heartbeat timer is checked
const CHECK_INTERVAL_MS: u64 = 10;

/// Heartbeat task
#[embassy_executor::task]
pub async fn heartbeat_task(mut heartbeat: Heartbeat) {
    info!("Heartbeat task started ({} ms)", heartbeat.interval_ms());

    let clock = EmbassyClock;
    let mut sink = ChannelSink;
    let mut ticker = Ticker::every(Duration::from_millis(CHECK_INTERVAL_MS));

    loop {
        ticker.next().await;

        let Some(message) = heartbeat.poll(clock.now_ms()) else {
            continue;
        };

        match message.encode() {
            Ok(line) => {
                if let Err(e) = sink.write_line(&line) {
                    warn!("Failed to queue heartbeat: {:?}", e);
                }
            }
            Err(e) => warn!("Failed to encode heartbeat: {:?}", e),
        }
    }
}
