//! UART configuration

use embassy_rp::uart::Config;

/// UART config for the node serial link: given baud rate, 8N1
pub fn uart_config(baudrate: u32) -> Config {
    let mut config = Config::default();
    config.baudrate = baudrate;
    config
}
