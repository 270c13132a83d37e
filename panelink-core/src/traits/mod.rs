//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod input;
pub mod sink;

pub use clock::Clock;
pub use input::InputPin;
pub use sink::Sink;
