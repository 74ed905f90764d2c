//! Core record types and traits

pub mod access;
pub mod error;
pub mod handler;
pub mod level;
pub mod processor;
pub mod record;

pub use access::{LegacyAccess, RecordKey, RecordValue};
pub use error::{LoggerError, Result};
pub use handler::Handler;
pub use level::Level;
pub use processor::Processor;
pub use record::{Fields, Overrides, Record};
