//! Configuration loading and dotted-path access.

mod env;
mod error;
mod file;
mod resolve;
mod tree;

pub use env::expand_env;
pub use error::ConfigError;
pub use file::{load, load_and_decode};
pub use resolve::SEPARATOR;
pub use tree::{ConfigTree, Node};
