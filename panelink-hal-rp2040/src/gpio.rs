//! Button input pins
//!
//! Wraps any `embedded-hal` input (normally `embassy_rp::gpio::Input`) and
//! applies the configured polarity so the core always sees `true` for a
//! pressed button.

use embassy_rp::gpio::Pull;
use embedded_hal::digital::InputPin as HalInputPin;

use panelink_core::config::PinConfig;
use panelink_core::traits::InputPin;

/// Internal pull to use for a configured button pin
///
/// - `^` (pull-up) requested: pull-up
/// - active-high without pull-up: pull-down, so an open switch reads low
/// - active-low without pull-up: none (external resistor expected)
pub fn pull_for(config: &PinConfig) -> Pull {
    if config.pull_up {
        Pull::Up
    } else if !config.inverted {
        Pull::Down
    } else {
        Pull::None
    }
}

/// Button input with polarity applied
pub struct ButtonInput<P> {
    pin: P,
    inverted: bool,
}

impl<P: HalInputPin> ButtonInput<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }
}

impl<P: HalInputPin> InputPin for ButtonInput<P> {
    fn is_high(&mut self) -> bool {
        // A failed read counts as "not pressed"
        match self.pin.is_high() {
            Ok(level) => level != self.inverted,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct Level(bool);

    impl ErrorType for Level {
        type Error = Infallible;
    }

    impl HalInputPin for Level {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[test]
    fn test_active_high() {
        assert!(ButtonInput::new(Level(true), false).is_high());
        assert!(!ButtonInput::new(Level(false), false).is_high());
    }

    #[test]
    fn test_active_low() {
        assert!(!ButtonInput::new(Level(true), true).is_high());
        assert!(ButtonInput::new(Level(false), true).is_high());
    }

    #[test]
    fn test_pull_selection() {
        assert_eq!(pull_for(&PinConfig::active_low_pullup(8)), Pull::Up);
        assert_eq!(pull_for(&PinConfig::new(8)), Pull::Down);
        assert_eq!(
            pull_for(&PinConfig { pin: 8, inverted: true, pull_up: false }),
            Pull::None
        );
    }
}
