//! Node configuration loading
//!
//! The configuration is compiled into the firmware from `node.toml`.
//! build.rs runs the same parser over it, so a file that reaches the board
//! always parses. The node name can be replaced at build time
//! with the `PANELINK_NODE_NAME` environment variable, which stands in for
//! per-board identity.

use defmt::*;

use panelink_core::config::{parse_node_config, NodeConfig};
use panelink_protocol::ComponentName;

/// Embedded configuration (compiled into firmware)
/// Edit node.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../node.toml");

/// Build-time node name override
const NAME_OVERRIDE: Option<&str> = option_env!("PANELINK_NODE_NAME");

/// Name used if the embedded config cannot be parsed
const FALLBACK_NAME: &str = "panel_node";

/// Load the node configuration
pub fn load_node_config() -> NodeConfig {
    let mut config = match parse_node_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded node configuration");
            config
        }
        Err(e) => {
            // Unreachable while build.rs runs parse_node_config
            error!("Failed to parse embedded node.toml: {:?}", e);
            error!("Using fallback configuration");
            NodeConfig::new(unwrap!(ComponentName::new(FALLBACK_NAME)))
        }
    };

    if let Some(name) = NAME_OVERRIDE {
        match ComponentName::new(name) {
            Ok(name) => {
                info!("Node name overridden at build time: {}", name);
                config.name = name;
            }
            Err(e) => warn!("Ignoring invalid PANELINK_NODE_NAME: {:?}", e),
        }
    }

    config
}
