//! Log level definitions
//!
//! The eight severities use the RFC 5424 ordering with sparse numeric codes,
//! so records coming from other systems can carry the raw code unchanged.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Level {
    Debug = 100,
    #[default]
    Info = 200,
    Notice = 250,
    Warning = 300,
    Error = 400,
    Critical = 500,
    Alert = 550,
    Emergency = 600,
}

impl Level {
    /// Every level, lowest severity first
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// Resolve a numeric code to its level
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            100 => Ok(Level::Debug),
            200 => Ok(Level::Info),
            250 => Ok(Level::Notice),
            300 => Ok(Level::Warning),
            400 => Ok(Level::Error),
            500 => Ok(Level::Critical),
            550 => Ok(Level::Alert),
            600 => Ok(Level::Emergency),
            _ => Err(LoggerError::invalid_level(code)),
        }
    }

    #[inline]
    pub fn code(&self) -> i64 {
        *self as i64
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Alert => "ALERT",
            Level::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "NOTICE" => Ok(Level::Notice),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            "ALERT" => Ok(Level::Alert),
            "EMERGENCY" => Ok(Level::Emergency),
            _ => Err(LoggerError::InvalidLevelName {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<i64> for Level {
    type Error = LoggerError;

    fn try_from(code: i64) -> Result<Self> {
        Level::from_code(code)
    }
}

impl TryFrom<i32> for Level {
    type Error = LoggerError;

    fn try_from(code: i32) -> Result<Self> {
        Level::from_code(i64::from(code))
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.code()
    }
}
