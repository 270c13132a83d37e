//! Serial receive task
//!
//! Reads lines from the peer on the other end of the link and logs them.
//! Nothing is acted on; this exists to confirm the wiring in both
//! directions.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use panelink_protocol::{LineReader, Message};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - reassembles and decodes incoming lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut reader = LineReader::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match reader.feed(byte) {
                        Ok(Some(line)) => handle_line(&line),
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => warn!("Line error: {:?}", e),
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
                reader.reset();
            }
        }
    }
}

/// Log a received line
fn handle_line(line: &str) {
    match Message::parse(line) {
        Ok(Message::Notification(n)) => {
            info!("Peer {}: {=str}", n.name, n.action.as_wire());
        }
        Ok(Message::Heartbeat(hb)) => {
            debug!("Peer {} alive, uptime {} ms", hb.device, hb.uptime_ms);
        }
        Err(e) => {
            warn!("Unrecognized line ({:?}): {=str}", e, line);
        }
    }
}
