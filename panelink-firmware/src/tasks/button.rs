//! Button polling task
//!
//! Samples the panel button at a fixed cadence and queues one notification
//! per debounced edge.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use panelink_core::button::ButtonReporter;
use panelink_hal_rp2040::{ButtonInput, EmbassyClock};

use crate::sink::ChannelSink;

/// Button polling interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 1;

/// Reporter type for the panel button
pub type PanelButton = ButtonReporter<ButtonInput<Input<'static>>>;

/// Button task - polls the reporter forever
#[embassy_executor::task]
pub async fn button_task(mut reporter: PanelButton) {
    info!(
        "Button task started ({}, debounce {} ms)",
        reporter.name(),
        reporter.debounce_ms()
    );

    let clock = EmbassyClock;
    let mut sink = ChannelSink;
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        match reporter.poll_and_report(&clock, &mut sink) {
            Ok(Some(edge)) => debug!("Button edge: {:?} (pressed={})", edge, reporter.is_pressed()),
            Ok(None) => {}
            Err(e) => warn!("Failed to report button edge: {:?}", e),
        }

        ticker.next().await;
    }
}
