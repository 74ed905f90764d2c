//! Fan-out handler that isolates child failures
//!
//! Forwards every record to every child and gives each one its chance to
//! succeed. An error returned by a child, or a panic raised inside it, is
//! dropped on the floor: later children still receive the record and the
//! caller never learns that anything went wrong.
//!
//! The group itself logs nothing. A swallowed panic still passes through the
//! process-wide panic hook first, so the default hook prints it to stderr;
//! applications that want silence install their own hook.
//!
//! Processors are not isolated. They run once, before the fan-out, and a
//! panicking processor unwinds through `handle` before any child is called.

use super::group::BroadcastGroup;
use crate::core::{Handler, Record, Result};
use std::panic::{self, AssertUnwindSafe};
use tracing::trace;

#[derive(Debug)]
pub struct FailureIsolatedGroupHandler {
    group: BroadcastGroup,
}

impl FailureIsolatedGroupHandler {
    pub fn new(handlers: Vec<Box<dyn Handler>>, bubble: bool) -> Self {
        Self {
            group: BroadcastGroup::new(handlers, bubble),
        }
    }

    pub fn group(&self) -> &BroadcastGroup {
        &self.group
    }
}

impl From<BroadcastGroup> for FailureIsolatedGroupHandler {
    fn from(group: BroadcastGroup) -> Self {
        Self { group }
    }
}

/// Run one child call, discarding both `Err` results and panics
fn isolated<T>(call: impl FnOnce() -> Result<T>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(_)) | Err(_) => None,
    }
}

impl Handler for FailureIsolatedGroupHandler {
    fn is_handling(&self, record: &Record) -> bool {
        self.group.is_handling(record)
    }

    fn handle(&mut self, record: &Record) -> Result<bool> {
        let record = self.group.prepare(record);
        trace!(
            handlers = self.group.handlers().len(),
            "broadcasting record with failure isolation"
        );

        for handler in self.group.handlers_mut() {
            isolated(|| handler.handle(&record));
        }

        Ok(self.group.handled())
    }

    fn handle_batch(&mut self, records: &[Record]) -> Result<()> {
        let records = self.group.prepare_batch(records);
        trace!(
            handlers = self.group.handlers().len(),
            records = records.len(),
            "broadcasting batch with failure isolation"
        );

        for handler in self.group.handlers_mut() {
            isolated(|| handler.handle_batch(&records));
        }

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        for handler in self.group.handlers_mut() {
            isolated(|| handler.close());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "failure_isolated_group"
    }
}
