//! Board-agnostic core logic for panel node firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits (input pin, clock, line sink)
//! - Button debounce and edge detection
//! - Button edge reporting
//! - Heartbeat timer
//! - Node configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod heartbeat;
pub mod traits;
