//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod button;
pub mod heartbeat;
pub mod serial_rx;
pub mod serial_tx;

pub use button::button_task;
pub use heartbeat::heartbeat_task;
pub use serial_rx::serial_rx_task;
pub use serial_tx::serial_tx_task;
