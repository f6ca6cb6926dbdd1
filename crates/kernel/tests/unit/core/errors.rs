//! # Fatal Error Tests
//!
//! Out-of-range devices, missing vectors, and malformed trace lines abort the run without
//! appending anything for the offending record.

use isrsim_core::config::{Config, SystemConfig};
use isrsim_core::sim::TraceRecord;
use isrsim_core::SimError;
use rstest::rstest;

use crate::common::harness::TestContext;

#[rstest]
#[case(TraceRecord::syscall(32))]
#[case(TraceRecord::end_io(32))]
#[case(TraceRecord::syscall(u64::MAX))]
fn test_device_outside_table_is_fatal(#[case] record: TraceRecord) {
    let err = TestContext::new().replay(&[record]).unwrap_err();
    assert!(matches!(err, SimError::DeviceOutOfRange { limit: 32, .. }));
}

#[rstest]
#[case(TraceRecord::syscall(5))]
#[case(TraceRecord::end_io(5))]
fn test_short_vector_table_is_fatal(#[case] record: TraceRecord) {
    let err = TestContext::new()
        .with_vector_len(5)
        .replay(&[record])
        .unwrap_err();
    assert!(matches!(err, SimError::MissingVector { device: 5, len: 5 }));
}

#[test]
fn test_unvalidated_layout_overflow_is_fatal_not_a_panic() {
    let config = Config {
        system: SystemConfig {
            vector_size: 1_000_000_000_000_000_000,
            ..SystemConfig::default()
        },
        ..Config::default()
    };
    let ctx = TestContext::new().with_config(config);
    let mut engine = ctx.engine();
    let err = engine.step(TraceRecord::syscall(31)).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidConfig {
            field: "system.vector_size",
            ..
        }
    ));
    assert!(engine.log().is_empty());
    assert_eq!(engine.now(), 0);
}

#[test]
fn test_failed_record_leaves_no_partial_sequence() {
    let ctx = TestContext::new().with_vector_len(2);
    let mut engine = ctx.engine();
    engine.step(TraceRecord::cpu(10)).unwrap();
    assert!(engine.step(TraceRecord::syscall(3)).is_err());
    assert_eq!(engine.log().len(), 1);
    assert_eq!(engine.now(), 10);
}

#[test]
fn test_failed_end_io_keeps_device_busy_state() {
    let ctx = TestContext::new().with_vector_len(4).with_busy(6, 90);
    let mut engine = ctx.engine();
    assert!(engine.step(TraceRecord::end_io(6)).is_err());
    assert_eq!(engine.devices().busy_until(6).unwrap(), Some(90));
    assert_eq!(engine.now(), 0);
}

#[test]
fn test_run_stops_at_first_error() {
    let ctx = TestContext::new().with_vector_len(3);
    let mut engine = ctx.engine();
    let result = engine.run([
        TraceRecord::cpu(10),
        TraceRecord::syscall(9),
        TraceRecord::cpu(20),
    ]);
    assert!(result.is_err());
    assert_eq!(engine.stats().cpu_bursts, 1);
    assert_eq!(engine.now(), 10);
}

#[test]
fn test_configurable_device_count() {
    let config = Config {
        system: SystemConfig {
            device_count: 4,
            ..SystemConfig::default()
        },
        ..Config::default()
    };
    let ctx = TestContext::new().with_config(config);
    assert!(ctx.replay(&[TraceRecord::syscall(3)]).is_ok());
    assert!(matches!(
        ctx.replay(&[TraceRecord::syscall(4)]),
        Err(SimError::DeviceOutOfRange {
            device: 4,
            limit: 4
        })
    ));
}

#[rstest]
#[case("CPU, 10\nWAIT, 3\nCPU, 5\n")]
#[case("CPU, 10\nSYSCALL, two\n")]
#[case("CPU, 10\nCPU\n")]
fn test_malformed_trace_aborts_run(#[case] trace: &str) {
    let ctx = TestContext::new();
    let mut engine = ctx.engine();
    let err = engine
        .run_trace(isrsim_core::sim::TraceReader::new(trace.as_bytes()))
        .unwrap_err();
    assert!(matches!(
        err,
        SimError::UnknownActivity { line: 2, .. } | SimError::InvalidArgument { line: 2, .. }
    ));
    assert_eq!(engine.log().len(), 1, "records after the bad line are not replayed");
}
