//! Panelink - Control Panel Node Firmware
//!
//! Main firmware binary for RP2040-based panel nodes. Watches one panel
//! button and reports debounced press/release edges as JSON lines on the
//! serial link, plus an optional uptime heartbeat.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{AnyPin, Input};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_rp::Peri;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use panelink_core::button::ButtonReporter;
use panelink_core::config::DEFAULT_BUTTON_PIN;
use panelink_core::heartbeat::Heartbeat;
use panelink_core::traits::Clock;
use panelink_hal_rp2040::{pull_for, uart_config, ButtonInput, EmbassyClock};

mod channels;
mod config;
mod sink;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Panelink node firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let node = config::load_node_config();
    info!(
        "Node '{}': baud={}, button=gpio{}, debounce={} ms",
        node.name, node.baudrate, node.button.pin.pin, node.button.debounce_ms
    );

    // Setup UART0 for the serial link
    // Pin assignments are board-specific (Pico: TX=GPIO0, RX=GPIO1)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(node.baudrate));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", node.baudrate);

    // Setup button input
    // GPIO0/1 belong to the UART; build.rs rejects them for the button
    let button_pin: Peri<'static, AnyPin> = match node.button.pin.pin {
        2 => p.PIN_2.into(),
        3 => p.PIN_3.into(),
        4 => p.PIN_4.into(),
        5 => p.PIN_5.into(),
        6 => p.PIN_6.into(),
        7 => p.PIN_7.into(),
        9 => p.PIN_9.into(),
        10 => p.PIN_10.into(),
        11 => p.PIN_11.into(),
        12 => p.PIN_12.into(),
        13 => p.PIN_13.into(),
        14 => p.PIN_14.into(),
        15 => p.PIN_15.into(),
        16 => p.PIN_16.into(),
        17 => p.PIN_17.into(),
        18 => p.PIN_18.into(),
        19 => p.PIN_19.into(),
        20 => p.PIN_20.into(),
        21 => p.PIN_21.into(),
        22 => p.PIN_22.into(),
        23 => p.PIN_23.into(),
        24 => p.PIN_24.into(),
        25 => p.PIN_25.into(),
        26 => p.PIN_26.into(),
        27 => p.PIN_27.into(),
        28 => p.PIN_28.into(),
        29 => p.PIN_29.into(),
        DEFAULT_BUTTON_PIN => p.PIN_8.into(),
        other => {
            warn!("gpio{} not usable for the button, using gpio{}", other, DEFAULT_BUTTON_PIN);
            p.PIN_8.into()
        }
    };

    let input = Input::new(button_pin, pull_for(&node.button.pin));
    let button = ButtonInput::new(input, node.button.pin.inverted);
    let reporter = ButtonReporter::new(button, node.name.clone(), node.button.debounce_ms);

    info!("Button input initialized");

    // Spawn tasks
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::button_task(reporter)).unwrap();

    match node.heartbeat {
        Some(hb) => {
            let heartbeat = Heartbeat::new(node.name.clone(), hb.interval_ms, EmbassyClock.now_ms());
            spawner.spawn(tasks::heartbeat_task(heartbeat)).unwrap();
        }
        None => info!("Heartbeat disabled"),
    }

    info!("All tasks spawned, node running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
