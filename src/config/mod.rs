// Configuration module for Pong
// Built-in defaults, optionally overridden by a TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config};
pub use types::{CenterLineParity, Config, PhysicsConfig, RulesConfig};
