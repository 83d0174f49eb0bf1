//! Loading configuration documents from disk.

use std::path::Path;

use serde::de::DeserializeOwned;
use toml::Table;

use super::env::expand_env;
use super::{ConfigError, ConfigTree};

/// Loads a TOML file into a [`ConfigTree`].
///
/// `${NAME}` placeholders are replaced with environment variables before the
/// text is parsed, so they may appear anywhere in the document.
///
/// ## Example
///
/// ```no_run
/// let config = cfgtree::load("config/app.toml")?;
/// let port = config.get_uint32("server.port", 8080);
/// # Ok::<(), cfgtree::ConfigError>(())
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<ConfigTree, ConfigError> {
    let path = path.as_ref();
    parse_file(path).map(ConfigTree::from)
}

/// Loads a TOML file and deserializes the whole document into `T`.
///
/// Runs the same read and expansion steps as [`load`], and reports the same
/// errors.
///
/// ## Example
///
/// ```no_run
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct AppConfig {
///     name: String,
///     port: u16,
/// }
///
/// let config: AppConfig = cfgtree::load_and_decode("config/app.toml")?;
/// # Ok::<(), cfgtree::ConfigError>(())
/// ```
pub fn load_and_decode<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let table = parse_file(path.as_ref())?;
    toml::Value::Table(table)
        .try_into()
        .map_err(ConfigError::DeserializeError)
}

fn parse_file(path: &Path) -> Result<Table, ConfigError> {
    let contents = read_config_file(path)?;
    let expanded = expand_env(&contents);
    toml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), bytes = contents.len(), "loaded config file");
            Ok(contents)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
