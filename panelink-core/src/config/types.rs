//! Configuration type definitions
//!
//! These types describe a single panel node. They are filled in once at
//! startup from the embedded `node.toml` and never change afterwards.

use panelink_protocol::ComponentName;

use crate::button::DEFAULT_DEBOUNCE_MS;
use crate::heartbeat::DEFAULT_HEARTBEAT_INTERVAL_MS;

/// Default serial baud rate
pub const DEFAULT_BAUDRATE: u32 = 19200;

/// Default button GPIO
pub const DEFAULT_BUTTON_PIN: u8 = 8;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Active-low input with the internal pull-up, the usual wiring for a
    /// button switching to ground
    pub const fn active_low_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Button input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    pub pin: PinConfig,
    /// Time the input must be stable before a change is accepted
    pub debounce_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::active_low_pullup(DEFAULT_BUTTON_PIN),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Heartbeat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeartbeatConfig {
    pub interval_ms: u32,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
        }
    }
}

/// Complete node configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    /// Name reported in every message
    pub name: ComponentName,
    /// Serial baud rate
    pub baudrate: u32,
    pub button: ButtonConfig,
    /// Heartbeat, disabled when None
    pub heartbeat: Option<HeartbeatConfig>,
}

impl NodeConfig {
    /// Node with the given name and default settings
    pub fn new(name: ComponentName) -> Self {
        Self {
            name,
            baudrate: DEFAULT_BAUDRATE,
            button: ButtonConfig::default(),
            heartbeat: None,
        }
    }
}
