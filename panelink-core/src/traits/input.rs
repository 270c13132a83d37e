//! Digital input abstraction

/// Digital input pin
///
/// `is_high` reports the *logical* level: implementations for active-low
/// wiring invert the electrical level so that `true` always means
/// "asserted" (button pressed). Reading a pin cannot fail.
///
/// Takes `&mut self` because some GPIO drivers need mutable access to read.
pub trait InputPin {
    /// Check if the input is asserted
    fn is_high(&mut self) -> bool;

    /// Check if the input is not asserted
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}
