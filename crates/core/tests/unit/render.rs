//! # Artifact Rendering Tests
//!
//! Exact text of the execution log and the status tables.

use ossim_core::log::render::{ExecutionText, execution_text, status_text};
use ossim_core::log::{ProcessState, SimLog, SnapshotRow, StatusSnapshot};
use ossim_core::process::Pcb;
use ossim_core::trace::{Activity, TraceEvent};
use pretty_assertions::assert_eq;

fn row(pcb: Pcb, state: ProcessState) -> SnapshotRow {
    SnapshotRow { pcb, state }
}

#[test]
fn test_execution_lines() {
    let mut log = SimLog::new();
    log.step(0, 50, "CPU Burst");
    log.step(50, 1, "switch to kernel mode");
    log.error(51, "FORK ERROR: No available partition");

    assert_eq!(
        execution_text(&log),
        "0, 50, CPU Burst\n\
         50, 1, switch to kernel mode\n\
         51, FORK ERROR: No available partition\n"
    );
    assert_eq!(ExecutionText(&log).to_string(), execution_text(&log));
}

#[test]
fn test_snapshots_do_not_appear_in_execution_text() {
    let mut log = SimLog::new();
    log.snapshot(StatusSnapshot {
        time: 5,
        event: TraceEvent::new(Activity::Fork, 10),
        rows: Vec::new(),
    });
    assert_eq!(execution_text(&log), "");
    assert_eq!(log.snapshots().count(), 1);
}

#[test]
fn test_status_table_layout() {
    let mut log = SimLog::new();
    log.step(0, 10, "cloning the PCB");
    log.snapshot(StatusSnapshot {
        time: 24,
        event: TraceEvent::new(Activity::Fork, 10),
        rows: vec![
            row(Pcb::new(1, Some(0), "init", 1).placed_in(2), ProcessState::Running),
            row(Pcb::new(0, None, "init", 1), ProcessState::Waiting),
        ],
    });
    log.snapshot(StatusSnapshot {
        time: 247,
        event: TraceEvent::new(Activity::Exec, 50).with_name("program1"),
        rows: vec![row(
            Pcb::new(1, Some(0), "program1", 10).placed_in(3),
            ProcessState::Running,
        )],
    });

    let expected = "\
time: 24; current trace: FORK, 10
+------------------------------------------------------+
| PID |program name |partition number | size |   state |
+------------------------------------------------------+
|   1 |        init |               2 |    1 | running |
|   0 |        init |               - |    1 | waiting |
+------------------------------------------------------+

time: 247; current trace: EXEC program1, 50
+------------------------------------------------------+
| PID |program name |partition number | size |   state |
+------------------------------------------------------+
|   1 |    program1 |               3 |   10 | running |
+------------------------------------------------------+

";
    assert_eq!(status_text(&log), expected);
}

#[test]
fn test_empty_log_renders_nothing() {
    let log = SimLog::new();
    assert_eq!(execution_text(&log), "");
    assert_eq!(status_text(&log), "");
}
