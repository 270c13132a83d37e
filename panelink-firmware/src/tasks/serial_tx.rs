//! Serial transmit task
//!
//! Drains the outgoing line channel into the UART.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use panelink_protocol::LINE_TERMINATOR;

use crate::channels::{DROPPED_LINES, LINE_CHANNEL};

/// Serial TX task - writes queued lines to the serial link
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let line = LINE_CHANNEL.receive().await;

        let dropped = DROPPED_LINES.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            warn!("{} line(s) dropped, TX queue was full", dropped);
        }

        if let Err(e) = write_line(&mut tx, &line).await {
            // Fire-and-forget: the line is lost
            warn!("Failed to send line: {:?}", e);
            continue;
        }

        trace!("TX: {=str}", line.as_str());
    }
}

async fn write_line(tx: &mut BufferedUartTx, line: &str) -> Result<(), embassy_rp::uart::Error> {
    tx.write_all(line.as_bytes()).await?;
    tx.write_all(LINE_TERMINATOR.as_bytes()).await
}
