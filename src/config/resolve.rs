//! Dotted-path resolution against a parsed configuration table.
//!
//! A key such as `server.tls.cert` names one node: every segment but the last
//! must resolve to a nested table.

use serde::de::{Error as _, Unexpected};
use toml::{Table, Value};

use super::ConfigError;

/// Separator between levels of a dotted key.
pub const SEPARATOR: char = '.';

/// Splits a dotted key into its segments.
///
/// Only the empty key is rejected; empty segments (`a..b`) are kept and looked
/// up as-is.
pub fn split_key(key: &str) -> Result<Vec<&str>, ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidKey);
    }
    Ok(key.split(SEPARATOR).collect())
}

/// Descends `table` one segment at a time and returns the node named by the
/// last segment.
///
/// Fails with [`ConfigError::KeyNotFound`] as soon as a segment is absent, and
/// with [`ConfigError::DecodeError`] when the path runs through a value that is
/// not a table.
pub fn find<'a>(segments: &[&str], table: &'a Table) -> Result<&'a Value, ConfigError> {
    let (last, parents) = segments.split_last().ok_or(ConfigError::InvalidKey)?;

    let mut current = table;
    for (depth, segment) in parents.iter().enumerate() {
        let walked = || segments[..=depth].join(".");
        let node = current
            .get(*segment)
            .ok_or_else(|| ConfigError::KeyNotFound(walked()))?;
        current = node.as_table().ok_or_else(|| ConfigError::DecodeError {
            key: walked(),
            source: toml::de::Error::invalid_type(unexpected(node), &"a table"),
        })?;
    }

    current
        .get(*last)
        .ok_or_else(|| ConfigError::KeyNotFound(segments.join(".")))
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::String(s) => Unexpected::Str(s),
        Value::Integer(i) => Unexpected::Signed(*i),
        Value::Float(f) => Unexpected::Float(*f),
        Value::Boolean(b) => Unexpected::Bool(*b),
        Value::Datetime(_) => Unexpected::Other("datetime"),
        Value::Array(_) => Unexpected::Seq,
        Value::Table(_) => Unexpected::Map,
    }
}
