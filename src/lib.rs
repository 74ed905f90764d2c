//! # Rust Record Pipeline
//!
//! Structured log records and the fan-out handlers that deliver them.
//!
//! ## Features
//!
//! - **Records**: immutable log events with a writable `extra`/`formatted` region
//! - **Legacy Access**: string-keyed field access with an explicit write allow-list
//! - **Broadcast Groups**: forward records to many handlers in registration order
//! - **Failure Isolation**: one failing or panicking handler never blocks the others

pub mod core;
pub mod handlers;

pub mod prelude {
    pub use crate::core::{
        Fields, Handler, LegacyAccess, Level, LoggerError, Overrides, Processor, Record,
        RecordKey, RecordValue, Result,
    };
    pub use crate::handlers::{
        BroadcastGroup, FailureIsolatedGroupHandler, GroupBuilder, GroupHandler,
    };
}

pub use crate::core::{
    Fields, Handler, LegacyAccess, Level, LoggerError, Overrides, Processor, Record, RecordKey,
    RecordValue, Result,
};
pub use handlers::{BroadcastGroup, FailureIsolatedGroupHandler, GroupBuilder, GroupHandler};
