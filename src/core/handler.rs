//! Handler trait for record consumers

use super::{error::Result, record::Record};

pub trait Handler: Send {
    /// Whether this handler would act on `record`
    fn is_handling(&self, _record: &Record) -> bool {
        true
    }

    /// Consume one record
    ///
    /// Returns `true` when the record was handled and upstream handlers
    /// should stop, `false` to let them continue.
    fn handle(&mut self, record: &Record) -> Result<bool>;

    /// Consume a batch of records, one `handle` call each by default
    fn handle_batch(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.handle(record)?;
        }
        Ok(())
    }

    /// Release resources held by the handler
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
