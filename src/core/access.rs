//! Map-style access to record fields
//!
//! Older formatters and processors address a record by string key
//! (`record["extra"]`, `record["level_name"]`). [`LegacyAccess`] keeps that
//! shape working on top of the typed [`Record`] while holding the same rules
//! as the typed API: only `extra` and `formatted` can be written, nothing can
//! be deleted, and reads hand back owned copies.

use super::error::{LoggerError, Result};
use super::record::{Fields, Record};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Logical record keys, ordered as they appear in [`Record::to_array`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKey {
    Message,
    Context,
    Level,
    LevelName,
    Channel,
    Datetime,
    Extra,
    Formatted,
}

impl RecordKey {
    /// Keys included in a record snapshot
    pub const ARRAY_KEYS: [RecordKey; 7] = [
        RecordKey::Message,
        RecordKey::Context,
        RecordKey::Level,
        RecordKey::LevelName,
        RecordKey::Channel,
        RecordKey::Datetime,
        RecordKey::Extra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Message => "message",
            RecordKey::Context => "context",
            RecordKey::Level => "level",
            RecordKey::LevelName => "level_name",
            RecordKey::Channel => "channel",
            RecordKey::Datetime => "datetime",
            RecordKey::Extra => "extra",
            RecordKey::Formatted => "formatted",
        }
    }

    /// Whether the key may be written through [`LegacyAccess::set`]
    pub fn is_writable(&self) -> bool {
        matches!(self, RecordKey::Extra | RecordKey::Formatted)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKey {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "message" => Ok(RecordKey::Message),
            "context" => Ok(RecordKey::Context),
            "level" => Ok(RecordKey::Level),
            "level_name" => Ok(RecordKey::LevelName),
            "channel" => Ok(RecordKey::Channel),
            "datetime" => Ok(RecordKey::Datetime),
            "extra" => Ok(RecordKey::Extra),
            "formatted" => Ok(RecordKey::Formatted),
            _ => Err(LoggerError::unknown_field(s)),
        }
    }
}

/// Owned copy of a single record field
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// `message`, `channel`, `level_name`
    Text(String),
    /// `level`
    Code(i64),
    DateTime(DateTime<FixedOffset>),
    /// `context`, `extra`
    Map(Fields),
    /// `formatted`, `null` when unset
    Value(Value),
}

impl RecordValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            RecordValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Fields> {
        match self {
            RecordValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to serde_json::Value, datetimes rendered as RFC 3339
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            RecordValue::Text(s) => Value::String(s),
            RecordValue::Code(code) => Value::Number(code.into()),
            RecordValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            RecordValue::Map(map) => Value::Object(map),
            RecordValue::Value(value) => value,
        }
    }
}

/// String-keyed view over a record
pub trait LegacyAccess {
    /// Whether `key` names a field that currently holds a value
    fn contains_key(&self, key: &str) -> bool;

    /// Read a copy of the field named `key`
    fn get(&self, key: &str) -> Result<RecordValue>;

    /// Write `extra` (must be a JSON object) or `formatted`
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Always fails: record fields cannot be removed
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl LegacyAccess for Record {
    fn contains_key(&self, key: &str) -> bool {
        key.parse::<RecordKey>()
            .map(|key| self.has_value(key))
            .unwrap_or(false)
    }

    fn get(&self, key: &str) -> Result<RecordValue> {
        let key: RecordKey = key.parse()?;
        Ok(self.value_of(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        match key.parse::<RecordKey>() {
            Ok(RecordKey::Extra) => match value {
                Value::Object(extra) => {
                    self.set_extra(extra);
                    Ok(())
                }
                _ => Err(LoggerError::invalid_argument("extra", "extra must be a map")),
            },
            Ok(RecordKey::Formatted) => {
                self.replace_formatted(Some(value));
                Ok(())
            }
            _ => Err(LoggerError::unsupported(format!("setting {}", key))),
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        Err(LoggerError::unsupported(format!("unsetting {}", key)))
    }
}
