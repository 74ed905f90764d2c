//! Processor trait for record enrichment

use super::record::Record;

/// A transformation applied to a record before it is dispatched
///
/// Processors take the record by value and hand back the (possibly
/// rewritten) record. Closures of the right shape are processors:
///
/// ```
/// use rust_record_pipeline::{Level, Processor, Record};
///
/// let tag = |mut record: Record| {
///     record.extra_mut().insert("host".into(), "web-1".into());
///     record
/// };
///
/// let record = tag.process(Record::now("app", Level::Info, "hello"));
/// assert_eq!(record.extra()["host"], "web-1");
/// ```
pub trait Processor: Send + Sync {
    fn process(&self, record: Record) -> Record;
}

impl<F> Processor for F
where
    F: Fn(Record) -> Record + Send + Sync,
{
    fn process(&self, record: Record) -> Record {
        self(record)
    }
}
