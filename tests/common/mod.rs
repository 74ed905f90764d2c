//! Shared handler and processor doubles for integration tests

#![allow(dead_code)]

use parking_lot::Mutex;
use rust_record_pipeline::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One observed call on a child handler
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Handle { handler: &'static str, record: Record },
    Batch { handler: &'static str, records: Vec<Record> },
    Close { handler: &'static str },
}

/// Call log shared by every double in a test
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    /// Handler labels in call order
    pub fn order(&self) -> Vec<&'static str> {
        self.0
            .lock()
            .iter()
            .map(|call| match call {
                Call::Handle { handler, .. }
                | Call::Batch { handler, .. }
                | Call::Close { handler } => *handler,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// Handler that records every call, then behaves as configured
pub struct ProbeHandler {
    label: &'static str,
    behavior: Behavior,
    log: CallLog,
}

impl ProbeHandler {
    pub fn new(label: &'static str, behavior: Behavior, log: &CallLog) -> Self {
        Self {
            label,
            behavior,
            log: log.clone(),
        }
    }

    pub fn ok(label: &'static str, log: &CallLog) -> Self {
        Self::new(label, Behavior::Succeed, log)
    }

    pub fn failing(label: &'static str, log: &CallLog) -> Self {
        Self::new(label, Behavior::Fail, log)
    }

    pub fn panicking(label: &'static str, log: &CallLog) -> Self {
        Self::new(label, Behavior::Panic, log)
    }

    fn outcome<T>(&self, value: T) -> Result<T> {
        match self.behavior {
            Behavior::Succeed => Ok(value),
            Behavior::Fail => Err(LoggerError::handler(self.label, "simulated failure")),
            Behavior::Panic => panic!("handler {} panicked", self.label),
        }
    }
}

impl Handler for ProbeHandler {
    fn handle(&mut self, record: &Record) -> Result<bool> {
        self.log.push(Call::Handle {
            handler: self.label,
            record: record.clone(),
        });
        self.outcome(true)
    }

    fn handle_batch(&mut self, records: &[Record]) -> Result<()> {
        self.log.push(Call::Batch {
            handler: self.label,
            records: records.to_vec(),
        });
        self.outcome(())
    }

    fn close(&mut self) -> Result<()> {
        self.log.push(Call::Close {
            handler: self.label,
        });
        self.outcome(())
    }

    fn name(&self) -> &str {
        self.label
    }
}

/// Processor that tags `extra` and counts its invocations
#[derive(Clone, Default)]
pub struct CountingProcessor {
    calls: Arc<AtomicUsize>,
}

impl CountingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Processor for CountingProcessor {
    fn process(&self, mut record: Record) -> Record {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        record.extra_mut().insert("processed".into(), n.into());
        record
    }
}

pub fn record(message: &str) -> Record {
    Record::now("integration", Level::Warning, message)
}
