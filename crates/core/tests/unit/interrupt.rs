//! # ISR Dispatch Tests
//!
//! Verifies the four boilerplate steps, their timing, vector addressing, and
//! table bounds checking.

use crate::common::harness::vectors;
use ossim_core::SimError;
use ossim_core::config::Config;
use ossim_core::interrupt::{DeviceTable, VectorTable, dispatch};
use ossim_core::log::LogRecord;
use ossim_core::log::render::execution_text;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_dispatch_boilerplate_lines() {
    let config = Config::default();
    let (log, time) = dispatch(100, 10, 3, &vectors(), &config).unwrap();

    assert_eq!(time, 113);
    assert_eq!(
        execution_text(&log),
        "100, 1, switch to kernel mode\n\
         101, 10, context saved\n\
         111, 1, find vector 3 in memory position 0x0006\n\
         112, 1, load address 0X0130 into the PC\n"
    );
}

#[rstest]
#[case(0, 3)]
#[case(10, 13)]
#[case(25, 28)]
fn test_dispatch_cost_is_fixed_plus_context(#[case] context: u64, #[case] cost: u64) {
    let config = Config::default();
    let (log, time) = dispatch(0, context, 1, &vectors(), &config).unwrap();
    assert_eq!(time, cost);
    assert_eq!(log.len(), 4);
}

#[test]
fn test_dispatch_uses_configured_vector_addressing() {
    let mut config = Config::default();
    config.vector.base = 0x100;
    config.vector.entry_size = 4;

    let (log, _) = dispatch(0, 10, 3, &vectors(), &config).unwrap();
    let LogRecord::Step { description, .. } = &log.records()[2] else {
        panic!("expected a step");
    };
    assert_eq!(description, "find vector 3 in memory position 0x010C");
}

#[test]
fn test_dispatch_rejects_unknown_vector() {
    let config = Config::default();
    let table = VectorTable::new(vec!["0X0001".into()]);
    assert!(matches!(
        dispatch(0, 10, 4, &table, &config),
        Err(SimError::UnknownVector { index: 4, len: 1 })
    ));
}

#[test]
fn test_dispatch_near_end_of_clock_overflows() {
    let config = Config::default();
    assert!(matches!(
        dispatch(u64::MAX - 2, 10, 1, &vectors(), &config),
        Err(SimError::ClockOverflow {
            time,
            duration: 10,
        }) if time == u64::MAX - 1
    ));
}

#[test]
fn test_device_table_lookup() {
    let devices = DeviceTable::new(vec![5, 7]);
    assert_eq!(devices.delay(1).unwrap(), 7);
    assert!(matches!(
        devices.delay(2),
        Err(SimError::UnknownDevice { index: 2, len: 2 })
    ));
}
