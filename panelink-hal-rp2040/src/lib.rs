//! RP2040-specific HAL for panel node firmware
//!
//! This crate implements the core capability traits on top of embassy-rp:
//! - Button inputs with configurable polarity and pulls
//! - Monotonic millisecond clock from the embassy time driver
//! - UART configuration from the node config

#![no_std]

pub mod clock;
pub mod gpio;
pub mod uart;

pub use clock::EmbassyClock;
pub use gpio::{pull_for, ButtonInput};
pub use uart::uart_config;
