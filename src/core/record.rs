//! Log record structure
//!
//! A [`Record`] is fixed once built, except for `extra` and `formatted`,
//! which processors and formatters are allowed to rewrite in place.

use super::access::{RecordKey, RecordValue};
use super::error::Result;
use super::level::Level;
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered map of structured data attached to a record
pub type Fields = serde_json::Map<String, Value>;

/// `formatted` holding JSON `null` is the same as `formatted` being unset
fn non_null(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        value => Some(value),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordRepr", from = "RecordRepr")]
pub struct Record {
    datetime: DateTime<FixedOffset>,
    channel: String,
    level: Level,
    message: String,
    context: Fields,
    extra: Fields,
    formatted: Option<Value>,
}

impl Record {
    pub fn new(
        datetime: impl Into<DateTime<FixedOffset>>,
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
    ) -> Self {
        Self {
            datetime: datetime.into(),
            channel: channel.into(),
            level,
            message: message.into(),
            context: Fields::new(),
            extra: Fields::new(),
            formatted: None,
        }
    }

    /// Create a record stamped with the current local time
    pub fn now(channel: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self::new(Local::now(), channel, level, message)
    }

    /// Create a record from a raw level code
    ///
    /// Fails with [`LoggerError::InvalidLevel`](super::error::LoggerError::InvalidLevel)
    /// when `code` is not one of the eight severities.
    pub fn from_code(
        datetime: impl Into<DateTime<FixedOffset>>,
        channel: impl Into<String>,
        code: i64,
        message: impl Into<String>,
    ) -> Result<Self> {
        let level = Level::from_code(code)?;
        Ok(Self::new(datetime, channel, level, message))
    }

    #[must_use]
    pub fn with_context(mut self, context: Fields) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Fields) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn with_formatted(mut self, formatted: Value) -> Self {
        self.formatted = non_null(formatted);
        self
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn level_name(&self) -> &'static str {
        self.level.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &Fields {
        &self.context
    }

    pub fn extra(&self) -> &Fields {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut Fields {
        &mut self.extra
    }

    pub fn set_extra(&mut self, extra: Fields) {
        self.extra = extra;
    }

    pub fn formatted(&self) -> Option<&Value> {
        self.formatted.as_ref()
    }

    /// Set `formatted`; JSON `null` clears it
    pub fn set_formatted(&mut self, formatted: Value) {
        self.formatted = non_null(formatted);
    }

    pub fn take_formatted(&mut self) -> Option<Value> {
        self.formatted.take()
    }

    /// Snapshot of the record as a keyed map
    ///
    /// Holds `message`, `context`, `level`, `level_name`, `channel`,
    /// `datetime` and `extra` in that order. `formatted` is not part of the
    /// snapshot. Every value is an owned copy.
    pub fn to_array(&self) -> BTreeMap<RecordKey, RecordValue> {
        RecordKey::ARRAY_KEYS
            .iter()
            .map(|&key| (key, self.value_of(key)))
            .collect()
    }

    /// Derive a new record, replacing only the fields set in `overrides`
    ///
    /// # Example
    ///
    /// ```
    /// use rust_record_pipeline::{Level, Overrides, Record};
    ///
    /// let record = Record::now("app", Level::Info, "started");
    /// let escalated = record.with(Overrides::new().level(Level::Error));
    ///
    /// assert_eq!(escalated.level_name(), "ERROR");
    /// assert_eq!(escalated.message(), "started");
    /// assert_eq!(record.level(), Level::Info);
    /// ```
    #[must_use]
    pub fn with(&self, overrides: Overrides) -> Record {
        Record {
            datetime: overrides.datetime.unwrap_or(self.datetime),
            channel: overrides.channel.unwrap_or_else(|| self.channel.clone()),
            level: overrides.level.unwrap_or(self.level),
            message: overrides.message.unwrap_or_else(|| self.message.clone()),
            context: overrides.context.unwrap_or_else(|| self.context.clone()),
            extra: overrides.extra.unwrap_or_else(|| self.extra.clone()),
            formatted: overrides
                .formatted
                .unwrap_or_else(|| self.formatted.clone()),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn value_of(&self, key: RecordKey) -> RecordValue {
        match key {
            RecordKey::Message => RecordValue::Text(self.message.clone()),
            RecordKey::Context => RecordValue::Map(self.context.clone()),
            RecordKey::Level => RecordValue::Code(self.level.code()),
            RecordKey::LevelName => RecordValue::Text(self.level_name().to_string()),
            RecordKey::Channel => RecordValue::Text(self.channel.clone()),
            RecordKey::Datetime => RecordValue::DateTime(self.datetime),
            RecordKey::Extra => RecordValue::Map(self.extra.clone()),
            RecordKey::Formatted => {
                RecordValue::Value(self.formatted.clone().unwrap_or(Value::Null))
            }
        }
    }

    pub(crate) fn has_value(&self, key: RecordKey) -> bool {
        match key {
            RecordKey::Formatted => self.formatted.is_some(),
            _ => true,
        }
    }

    pub(crate) fn replace_formatted(&mut self, formatted: Option<Value>) {
        self.formatted = formatted.and_then(non_null);
    }
}

/// Field replacements for [`Record::with`]
///
/// Unset fields are copied from the source record.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Overrides {
    datetime: Option<DateTime<FixedOffset>>,
    channel: Option<String>,
    level: Option<Level>,
    message: Option<String>,
    context: Option<Fields>,
    extra: Option<Fields>,
    formatted: Option<Option<Value>>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datetime(mut self, datetime: impl Into<DateTime<FixedOffset>>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn context(mut self, context: Fields) -> Self {
        self.context = Some(context);
        self
    }

    pub fn extra(mut self, extra: Fields) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Replace `formatted`; `None` or JSON `null` clears it on the derived record
    pub fn formatted(mut self, formatted: Option<Value>) -> Self {
        self.formatted = Some(formatted.and_then(non_null));
        self
    }

    /// True when no field is overridden
    pub fn is_empty(&self) -> bool {
        self.datetime.is_none()
            && self.channel.is_none()
            && self.level.is_none()
            && self.message.is_none()
            && self.context.is_none()
            && self.extra.is_none()
            && self.formatted.is_none()
    }
}

/// Wire shape of a record; `level_name` is written but never read back
#[derive(Serialize, Deserialize)]
struct RecordRepr {
    message: String,
    #[serde(default)]
    context: Fields,
    level: Level,
    #[serde(default, skip_deserializing)]
    level_name: String,
    channel: String,
    datetime: DateTime<FixedOffset>,
    #[serde(default)]
    extra: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    formatted: Option<Value>,
}

impl From<Record> for RecordRepr {
    fn from(record: Record) -> Self {
        Self {
            level_name: record.level_name().to_string(),
            message: record.message,
            context: record.context,
            level: record.level,
            channel: record.channel,
            datetime: record.datetime,
            extra: record.extra,
            formatted: record.formatted,
        }
    }
}

impl From<RecordRepr> for Record {
    fn from(repr: RecordRepr) -> Self {
        Self {
            datetime: repr.datetime,
            channel: repr.channel,
            level: repr.level,
            message: repr.message,
            context: repr.context,
            extra: repr.extra,
            formatted: repr.formatted,
        }
    }
}
