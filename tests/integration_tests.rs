//! Integration tests for the record pipeline
//!
//! These tests verify:
//! - Failure isolation across child handlers (errors and panics)
//! - Batch delivery semantics
//! - Processor placement and invocation counts
//! - The bubble-derived return value
//! - Record derivation and legacy field access

mod common;

use common::{record, Behavior, Call, CallLog, CountingProcessor, ProbeHandler};
use rust_record_pipeline::prelude::*;
use serde_json::json;

fn isolated_group(
    behaviors: &[(&'static str, Behavior)],
    bubble: bool,
    log: &CallLog,
) -> FailureIsolatedGroupHandler {
    behaviors
        .iter()
        .fold(GroupBuilder::new().bubble(bubble), |builder, &(label, behavior)| {
            builder.handler(ProbeHandler::new(label, behavior, log))
        })
        .build_isolated()
}

#[test]
fn test_failing_middle_child_is_skipped_over() {
    for bubble in [false, true] {
        let log = CallLog::new();
        let mut group = isolated_group(
            &[("a", Behavior::Succeed), ("b", Behavior::Fail), ("c", Behavior::Succeed)],
            bubble,
            &log,
        );

        let r = record("payment failed");
        let handled = group.handle(&r).expect("child failures must not escape");

        assert_eq!(handled, !bubble);
        assert_eq!(log.order(), ["a", "b", "c"]);
        for call in log.calls() {
            match call {
                Call::Handle { record, .. } => assert_eq!(record, r),
                other => panic!("unexpected call {:?}", other),
            }
        }
    }
}

#[test]
fn test_all_children_failing() {
    let log = CallLog::new();
    let mut group = isolated_group(
        &[("a", Behavior::Fail), ("b", Behavior::Panic), ("c", Behavior::Fail)],
        false,
        &log,
    );

    assert!(group.handle(&record("m")).unwrap());
    assert!(group.handle_batch(&[record("m")]).is_ok());
    assert_eq!(log.order(), ["a", "b", "c", "a", "b", "c"]);
}

#[test]
fn test_child_returning_handled_does_not_short_circuit() {
    let log = CallLog::new();
    let mut group = isolated_group(
        &[("a", Behavior::Succeed), ("b", Behavior::Succeed)],
        true,
        &log,
    );

    assert!(!group.handle(&record("m")).unwrap());
    assert_eq!(log.order(), ["a", "b"]);
}

#[test]
fn test_batch_forwarded_whole_without_processors() {
    let log = CallLog::new();
    let mut group = isolated_group(
        &[("a", Behavior::Succeed), ("b", Behavior::Panic), ("c", Behavior::Succeed)],
        true,
        &log,
    );

    let batch = vec![record("r1"), record("r2")];
    group.handle_batch(&batch).unwrap();

    let calls = log.calls();
    assert_eq!(calls.len(), 3);
    for (call, label) in calls.into_iter().zip(["a", "b", "c"]) {
        assert_eq!(
            call,
            Call::Batch {
                handler: label,
                records: batch.clone(),
            }
        );
    }
}

#[test]
fn test_processor_output_reaches_every_child() {
    let log = CallLog::new();
    let processor = CountingProcessor::new();
    let mut group = GroupBuilder::new()
        .processor(processor.clone())
        .handler(ProbeHandler::ok("a", &log))
        .handler(ProbeHandler::failing("b", &log))
        .handler(ProbeHandler::ok("c", &log))
        .build_isolated();

    let original = record("m");
    group.handle(&original).unwrap();

    assert_eq!(processor.calls(), 1);
    assert!(original.extra().is_empty());
    for call in log.calls() {
        match call {
            Call::Handle { record, .. } => {
                assert_eq!(record.extra()["processed"], json!(1));
                assert_eq!(record.message(), "m");
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
}

#[test]
fn test_processor_maps_each_batch_record_once() {
    let log = CallLog::new();
    let processor = CountingProcessor::new();
    let mut group = GroupBuilder::new()
        .processor(processor.clone())
        .handler(ProbeHandler::ok("a", &log))
        .handler(ProbeHandler::ok("b", &log))
        .build_isolated();

    group.handle_batch(&[record("r1"), record("r2")]).unwrap();
    assert_eq!(processor.calls(), 2);

    let batches: Vec<Vec<Record>> = log
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::Batch { records, .. } => records,
            other => panic!("unexpected call {:?}", other),
        })
        .collect();

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0], batches[1]);
    assert_eq!(batches[0][0].extra()["processed"], json!(1));
    assert_eq!(batches[0][1].extra()["processed"], json!(2));
}

#[test]
#[should_panic(expected = "processor rejected record")]
fn test_processor_panic_propagates() {
    let log = CallLog::new();
    let mut group = GroupBuilder::new()
        .processor(|_record: Record| -> Record { panic!("processor rejected record") })
        .handler(ProbeHandler::ok("a", &log))
        .build_isolated();

    let _ = group.handle(&record("m"));
}

#[test]
fn test_processor_panic_skips_children() {
    let log = CallLog::new();
    let mut group = GroupBuilder::new()
        .processor(|_record: Record| -> Record { panic!("processor rejected record") })
        .handler(ProbeHandler::ok("a", &log))
        .build_isolated();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        group.handle(&record("m"))
    }));

    assert!(outcome.is_err());
    assert!(log.calls().is_empty());
}

#[test]
fn test_plain_group_propagates_first_failure() {
    let log = CallLog::new();
    let mut group = GroupBuilder::new()
        .handler(ProbeHandler::ok("a", &log))
        .handler(ProbeHandler::failing("b", &log))
        .handler(ProbeHandler::ok("c", &log))
        .build();

    let err = group.handle(&record("m")).unwrap_err();
    assert!(matches!(err, LoggerError::HandlerError { .. }));
    assert_eq!(log.order(), ["a", "b"]);
}

#[test]
fn test_nested_groups() {
    let log = CallLog::new();
    let inner = GroupBuilder::new()
        .handler(ProbeHandler::failing("inner-a", &log))
        .handler(ProbeHandler::ok("inner-b", &log))
        .build();
    let mut outer = GroupBuilder::new()
        .handler(inner)
        .handler(ProbeHandler::ok("outer", &log))
        .bubble(false)
        .build_isolated();

    assert!(outer.handle(&record("m")).unwrap());
    // the plain inner group aborts at its failing child, the outer group carries on
    assert_eq!(log.order(), ["inner-a", "outer"]);
}

#[test]
fn test_close_reaches_all_children() {
    let log = CallLog::new();
    let mut group = isolated_group(
        &[("a", Behavior::Panic), ("b", Behavior::Fail), ("c", Behavior::Succeed)],
        true,
        &log,
    );

    assert!(group.close().is_ok());
    assert_eq!(log.order(), ["a", "b", "c"]);
}

#[test]
fn test_group_moves_across_threads() {
    let log = CallLog::new();
    let mut group = isolated_group(&[("a", Behavior::Succeed)], false, &log);

    let handled = std::thread::spawn(move || group.handle(&record("m")).unwrap())
        .join()
        .unwrap();

    assert!(handled);
    assert_eq!(log.order(), ["a"]);
}

#[test]
fn test_record_processed_in_handler_keeps_immutable_fields() {
    let mut r = record("m");
    r.set("extra", json!({"k": "v"})).unwrap();
    r.set("formatted", json!("[integration] m")).unwrap();

    assert!(r.set("message", json!("other")).is_err());
    assert!(r.remove("extra").is_err());

    let mut level = r.get("level_name").unwrap();
    if let RecordValue::Text(ref mut name) = level {
        name.push_str("-tampered");
    }
    assert_eq!(r.level_name(), "WARNING");
    assert_eq!(r.extra()["k"], json!("v"));
    assert_eq!(r.formatted(), Some(&json!("[integration] m")));
}

#[test]
fn test_record_json_carries_level_name() {
    let r = record("disk almost full").with(Overrides::new().level(Level::Critical));
    let value: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();

    assert_eq!(value["level"], json!(500));
    assert_eq!(value["level_name"], json!("CRITICAL"));
    assert_eq!(value["channel"], json!("integration"));
    assert!(value.get("formatted").is_none());
}
