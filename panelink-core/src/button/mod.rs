//! Button input handling
//!
//! Debounce filtering, edge detection and edge reporting for panel buttons.

pub mod debounce;
pub mod reporter;

pub use debounce::{ButtonState, Edge, DEFAULT_DEBOUNCE_MS};
pub use reporter::{notification_for, ButtonReporter, ReportError};
