pub mod config;
mod error;
pub mod global;

pub use config::{
    expand_env, load, load_and_decode, ConfigError, ConfigTree, Node, SEPARATOR,
};
pub use error::Error;
pub use global::{get_global_config, global_config, set_global_config, try_global_config};
