//! Node configuration
//!
//! Type definitions and the `node.toml` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_node_config, parse_pin, ParseError};
pub use types::{
    ButtonConfig, HeartbeatConfig, NodeConfig, PinConfig, DEFAULT_BAUDRATE, DEFAULT_BUTTON_PIN,
    GPIO_COUNT,
};
