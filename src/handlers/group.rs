//! Broadcast groups: one record, many handlers

use crate::core::{Handler, Processor, Record, Result};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, trace};

/// Shared state of every fan-out handler
///
/// Holds the child handlers and processors in registration order plus the
/// `bubble` flag. Nothing here changes after construction.
pub struct BroadcastGroup {
    handlers: Vec<Box<dyn Handler>>,
    processors: Vec<Box<dyn Processor>>,
    bubble: bool,
}

impl BroadcastGroup {
    pub fn new(handlers: Vec<Box<dyn Handler>>, bubble: bool) -> Self {
        Self {
            handlers,
            processors: Vec::new(),
            bubble,
        }
    }

    /// Create a builder for a group
    ///
    /// # Example
    /// ```
    /// use rust_record_pipeline::prelude::*;
    ///
    /// struct Discard;
    ///
    /// impl Handler for Discard {
    ///     fn handle(&mut self, _record: &Record) -> Result<bool> {
    ///         Ok(false)
    ///     }
    ///
    ///     fn name(&self) -> &str {
    ///         "discard"
    ///     }
    /// }
    ///
    /// let mut group = BroadcastGroup::builder()
    ///     .handler(Discard)
    ///     .handler(Discard)
    ///     .bubble(false)
    ///     .build_isolated();
    ///
    /// let handled = group.handle(&Record::now("app", Level::Info, "hi")).unwrap();
    /// assert!(handled);
    /// ```
    #[must_use]
    pub fn builder() -> GroupBuilder {
        GroupBuilder::new()
    }

    pub fn handlers(&self) -> &[Box<dyn Handler>] {
        &self.handlers
    }

    pub(crate) fn handlers_mut(&mut self) -> &mut [Box<dyn Handler>] {
        &mut self.handlers
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    pub fn bubble(&self) -> bool {
        self.bubble
    }

    /// Value reported to the caller of `handle`
    ///
    /// `true` ("handled, stop") when the group does not bubble.
    #[inline]
    pub fn handled(&self) -> bool {
        !self.bubble
    }

    /// Run the processor chain over `record`, in registration order
    pub fn process_record(&self, record: Record) -> Record {
        self.processors
            .iter()
            .fold(record, |record, processor| processor.process(record))
    }

    /// The record children should see; borrowed as-is without processors
    pub(crate) fn prepare<'a>(&self, record: &'a Record) -> Cow<'a, Record> {
        if self.processors.is_empty() {
            Cow::Borrowed(record)
        } else {
            Cow::Owned(self.process_record(record.clone()))
        }
    }

    /// The batch children should see; each record processed once
    pub(crate) fn prepare_batch<'a>(&self, records: &'a [Record]) -> Cow<'a, [Record]> {
        if self.processors.is_empty() {
            Cow::Borrowed(records)
        } else {
            Cow::Owned(
                records
                    .iter()
                    .map(|record| self.process_record(record.clone()))
                    .collect(),
            )
        }
    }

    /// True when any child would handle `record`
    pub fn is_handling(&self, record: &Record) -> bool {
        self.handlers.iter().any(|handler| handler.is_handling(record))
    }
}

impl fmt::Debug for BroadcastGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastGroup")
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .field("processors", &self.processors.len())
            .field("bubble", &self.bubble)
            .finish()
    }
}

/// Fan-out handler that stops at the first failing child
///
/// A child error is returned to the caller as-is and the children after it
/// do not see the record. Use
/// [`FailureIsolatedGroupHandler`](super::FailureIsolatedGroupHandler) when
/// every child must get its chance.
#[derive(Debug)]
pub struct GroupHandler {
    group: BroadcastGroup,
}

impl GroupHandler {
    pub fn new(handlers: Vec<Box<dyn Handler>>, bubble: bool) -> Self {
        Self {
            group: BroadcastGroup::new(handlers, bubble),
        }
    }

    pub fn group(&self) -> &BroadcastGroup {
        &self.group
    }
}

impl From<BroadcastGroup> for GroupHandler {
    fn from(group: BroadcastGroup) -> Self {
        Self { group }
    }
}

impl Handler for GroupHandler {
    fn is_handling(&self, record: &Record) -> bool {
        self.group.is_handling(record)
    }

    fn handle(&mut self, record: &Record) -> Result<bool> {
        let record = self.group.prepare(record);
        trace!(handlers = self.group.handlers.len(), "broadcasting record");

        for handler in self.group.handlers_mut() {
            handler.handle(&record)?;
        }

        Ok(self.group.handled())
    }

    fn handle_batch(&mut self, records: &[Record]) -> Result<()> {
        let records = self.group.prepare_batch(records);
        trace!(
            handlers = self.group.handlers.len(),
            records = records.len(),
            "broadcasting batch"
        );

        for handler in self.group.handlers_mut() {
            handler.handle_batch(&records)?;
        }

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut first_error = None;
        for handler in self.group.handlers_mut() {
            if let Err(e) = handler.close() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn name(&self) -> &str {
        "group"
    }
}

/// Builder for fan-out handlers with a fluent API
///
/// # Example
/// ```
/// use rust_record_pipeline::prelude::*;
///
/// let group = GroupBuilder::new()
///     .processor(|mut record: Record| {
///         record.extra_mut().insert("env".into(), "prod".into());
///         record
///     })
///     .bubble(false)
///     .build_group();
///
/// assert_eq!(group.processor_count(), 1);
/// assert!(group.handled());
/// ```
pub struct GroupBuilder {
    handlers: Vec<Box<dyn Handler>>,
    processors: Vec<Box<dyn Processor>>,
    bubble: bool,
}

impl GroupBuilder {
    /// Create a new builder; groups bubble by default
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            processors: Vec::new(),
            bubble: true,
        }
    }

    /// Add a child handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Add an already boxed child handler
    #[must_use = "builder methods return a new value"]
    pub fn boxed_handler(mut self, handler: Box<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Add a processor; processors run in the order they are added
    #[must_use = "builder methods return a new value"]
    pub fn processor<P: Processor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Set whether the group lets records bubble to upstream handlers
    #[must_use = "builder methods return a new value"]
    pub fn bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    /// Build the shared group state
    pub fn build_group(self) -> BroadcastGroup {
        debug!(
            handlers = self.handlers.len(),
            processors = self.processors.len(),
            bubble = self.bubble,
            "building broadcast group"
        );

        BroadcastGroup {
            handlers: self.handlers,
            processors: self.processors,
            bubble: self.bubble,
        }
    }

    /// Build a group that propagates the first child failure
    pub fn build(self) -> GroupHandler {
        GroupHandler::from(self.build_group())
    }

    /// Build a group that isolates every child failure
    pub fn build_isolated(self) -> super::FailureIsolatedGroupHandler {
        super::FailureIsolatedGroupHandler::from(self.build_group())
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
