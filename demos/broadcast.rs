//! Broadcast handler example
//!
//! Demonstrates fanning records out to several handlers where one of them
//! is broken, and the difference between the plain and failure-isolated groups.
//!
//! Run with: cargo run --example broadcast

use rust_record_pipeline::prelude::*;
use serde_json::json;

/// Prints every record it receives
struct StdoutHandler {
    prefix: &'static str,
}

impl Handler for StdoutHandler {
    fn handle(&mut self, record: &Record) -> Result<bool> {
        println!(
            "   {} [{}] {}.{}: {} {}",
            self.prefix,
            record.datetime().format("%H:%M:%S"),
            record.channel(),
            record.level_name(),
            record.message(),
            serde_json::Value::Object(record.extra().clone())
        );
        Ok(true)
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// Simulates a sink whose backend is unreachable
struct UnreachableHandler;

impl Handler for UnreachableHandler {
    fn handle(&mut self, _record: &Record) -> Result<bool> {
        Err(LoggerError::handler("unreachable", "connection refused"))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Rust Record Pipeline - Broadcast Example ===\n");

    let tag_host = |mut record: Record| {
        record.extra_mut().insert("host".into(), json!("web-1"));
        record
    };

    println!("1. Failure-isolated group with a broken handler in the middle:");
    let mut isolated = GroupBuilder::new()
        .processor(tag_host)
        .handler(StdoutHandler { prefix: "first " })
        .handler(UnreachableHandler)
        .handler(StdoutHandler { prefix: "second" })
        .bubble(false)
        .build_isolated();

    let record = Record::now("orders", Level::Error, "payment gateway timeout");
    let handled = isolated.handle(&record)?;
    println!("   handled = {}\n", handled);

    println!("2. Plain group stops at the broken handler:");
    let mut plain = GroupBuilder::new()
        .handler(StdoutHandler { prefix: "first " })
        .handler(UnreachableHandler)
        .handler(StdoutHandler { prefix: "second" })
        .build();

    if let Err(e) = plain.handle(&record) {
        println!("   error: {}\n", e);
    }

    println!("3. Legacy field access:");
    let mut record = record.with(Overrides::new().level(Level::Critical));
    record.set("extra", json!({"retry": 3}))?;
    println!("   level_name = {:?}", record.get("level_name")?);
    if let Err(e) = record.set("message", json!("rewritten")) {
        println!("   set message: {}", e);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
