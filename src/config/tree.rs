//! Typed access to one level of parsed configuration.

use std::any::TypeId;

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::Deserialize;
use toml::{Table, Value};

use super::resolve::{find, split_key};
use super::ConfigError;

/// A parsed configuration node, decoded on demand into the caller's type.
pub type Node = Value;

/// One level of the configuration hierarchy: a map from key to [`Node`].
///
/// Values are looked up with dotted keys (`database.pool.size`) and decoded
/// through serde into whatever type the caller asks for. The typed getters
/// fall back to a default on any failure; use [`decode`](Self::decode) to see
/// the error instead.
///
/// ## Example
///
/// ```
/// use cfgtree::ConfigTree;
///
/// let tree: ConfigTree = toml::from_str(
///     r#"
///     [server]
///     host = "localhost"
///     port = 8080
///     "#,
/// )?;
///
/// assert_eq!(tree.get_string("server.host", "0.0.0.0"), "localhost");
/// assert_eq!(tree.get_uint32("server.port", 80), 8080);
/// assert_eq!(tree.get_bool("server.tls", false), false);
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    table: Table,
}

impl ConfigTree {
    /// Returns the node at `key` without decoding it.
    pub fn get(&self, key: &str) -> Result<&Node, ConfigError> {
        let segments = split_key(key)?;
        find(&segments, &self.table)
    }

    /// Returns `true` if `key` resolves to a node.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Decodes the node at `key` into `T`.
    ///
    /// Unlike the typed getters, every failure is returned: an empty key, a
    /// missing segment, or a node of the wrong shape. A float that overflows
    /// `f32` is rejected rather than decoded as infinity.
    pub fn decode<T: DeserializeOwned + 'static>(&self, key: &str) -> Result<T, ConfigError> {
        let node = self.get(key)?;
        if TypeId::of::<T>() == TypeId::of::<f32>() {
            check_f32_range(key, node)?;
        }
        node.clone()
            .try_into()
            .map_err(|source| ConfigError::DecodeError {
                key: key.to_string(),
                source,
            })
    }

    /// Decodes the node at `key` into a nested tree.
    pub fn sub_tree(&self, key: &str) -> Result<ConfigTree, ConfigError> {
        self.decode(key)
    }

    /// Decodes the node at `key`, or returns `default` on any failure.
    pub fn get_or<T: DeserializeOwned + 'static>(&self, key: &str, default: T) -> T {
        match self.decode(key) {
            Ok(value) => value,
            Err(error) => {
                tracing::trace!(key, %error, "using default config value");
                default
            }
        }
    }

    /// Decodes the node at `key` as the getter's type, or returns `default`
    /// on any failure. The remaining typed getters behave the same way.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.decode(key).unwrap_or_else(|error| {
            tracing::trace!(key, %error, "using default config value");
            default.to_string()
        })
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    pub fn get_int(&self, key: &str, default: isize) -> isize {
        self.get_or(key, default)
    }

    pub fn get_int32(&self, key: &str, default: i32) -> i32 {
        self.get_or(key, default)
    }

    pub fn get_int64(&self, key: &str, default: i64) -> i64 {
        self.get_or(key, default)
    }

    pub fn get_uint(&self, key: &str, default: usize) -> usize {
        self.get_or(key, default)
    }

    pub fn get_uint32(&self, key: &str, default: u32) -> u32 {
        self.get_or(key, default)
    }

    pub fn get_uint64(&self, key: &str, default: u64) -> u64 {
        self.get_or(key, default)
    }

    pub fn get_float32(&self, key: &str, default: f32) -> f32 {
        self.get_or(key, default)
    }

    pub fn get_float64(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    /// Top-level keys of this tree.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn as_table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}

/// Rejects finite floats that would become infinite as `f32`.
fn check_f32_range(key: &str, node: &Node) -> Result<(), ConfigError> {
    match node {
        Value::Float(v) if v.is_finite() && (*v as f32).is_infinite() => {
            Err(ConfigError::DecodeError {
                key: key.to_string(),
                source: toml::de::Error::invalid_value(
                    Unexpected::Float(*v),
                    &"a float within f32 range",
                ),
            })
        }
        _ => Ok(()),
    }
}

impl From<Table> for ConfigTree {
    fn from(table: Table) -> Self {
        Self { table }
    }
}
