//! Fan-out handler implementations

pub mod failure_isolated;
pub mod group;

pub use failure_isolated::FailureIsolatedGroupHandler;
pub use group::{BroadcastGroup, GroupBuilder, GroupHandler};

// Re-export traits so handler authors need a single import
pub use crate::core::{Handler, Processor};
