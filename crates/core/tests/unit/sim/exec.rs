//! # EXEC Tests
//!
//! Image replacement, partition bookkeeping, and EXEC failures.

use crate::common::harness::{Fixture, trace};
use ossim_core::log::render::{execution_text, status_text};
use ossim_core::log::{ProcessState, SnapshotRow};
use ossim_core::memory::Occupant;
use ossim_core::process::{Pcb, WaitQueue};
use pretty_assertions::assert_eq;

fn with_program1(program_trace: &str) -> Fixture {
    Fixture::new().with_program("program1", 10, program_trace)
}

#[test]
fn test_exec_execution_text() {
    let run = with_program1("CPU, 100\n").run("EXEC program1, 50\nCPU, 999\n");
    assert_eq!(
        execution_text(&run.outcome.log),
        "0, 1, switch to kernel mode\n\
         1, 10, context saved\n\
         11, 1, find vector 3 in memory position 0x0006\n\
         12, 1, load address 0X0130 into the PC\n\
         13, 50, Program is 10 Mb large\n\
         63, 150, loading program into memory\n\
         213, 3, marking partition as occupied\n\
         216, 6, updating PCB\n\
         222, 0, scheduler called\n\
         222, 1, IRET\n\
         223, 100, CPU Burst\n"
    );
    assert_eq!(run.outcome.end_time, 323);
}

#[test]
fn test_exec_snapshot() {
    let run = with_program1("CPU, 100\n").run("EXEC program1, 50\n");
    let snapshot = run.outcome.log.snapshots().next().unwrap();

    assert_eq!(snapshot.time, 223);
    assert_eq!(snapshot.event.to_string(), "EXEC program1, 50");
    assert_eq!(
        snapshot.rows,
        vec![SnapshotRow {
            pcb: Pcb::new(0, None, "program1", 10).placed_in(2),
            state: ProcessState::Running,
        }]
    );
}

#[test]
fn test_exec_frees_old_and_new_partitions() {
    let run = with_program1("CPU, 100\n").run("EXEC program1, 50\n");
    assert!(run.memory.iter().all(|p| p.occupant == Occupant::Empty));
}

#[test]
fn test_exec_cannot_reuse_current_partition() {
    let run = with_program1("CPU, 100\n")
        .with_partitions(&[10])
        .run("EXEC program1, 50\n");
    assert_eq!(
        execution_text(&run.outcome.log).lines().last(),
        Some("13, EXEC ERROR: No available partition")
    );
}

#[test]
fn test_exec_unknown_program() {
    let run = Fixture::new().run("EXEC nothing, 50\nCPU, 100\n");
    let text = execution_text(&run.outcome.log);

    assert!(text.ends_with("13, EXEC ERROR: Program not found\n"));
    assert_eq!(run.outcome.log.errors().count(), 1);
    assert_eq!(run.outcome.end_time, 13);
    assert_eq!(status_text(&run.outcome.log), "");
    assert!(!run.memory.is_free(1));
}

#[test]
fn test_exec_too_large_for_every_partition() {
    let run = Fixture::new()
        .with_program("huge", 50, "CPU, 1\n")
        .run("EXEC huge, 5\nCPU, 100\n");

    assert!(execution_text(&run.outcome.log).ends_with("13, EXEC ERROR: No available partition\n"));
    assert_eq!(run.outcome.end_time, 13);
}

#[test]
fn test_exec_accepts_trailing_name_spelling() {
    let run = with_program1("CPU, 100\n").run("EXEC, 50, program1\n");
    assert_eq!(run.outcome.end_time, 323);
}

#[test]
fn test_fork_then_exec_in_child() {
    let run = with_program1("CPU, 100\n").run(
        "FORK, 10\nIF_CHILD, 0\nEXEC program1, 50\nIF_PARENT, 0\nCPU, 7\nENDIF, 0\n",
    );

    let snapshots: Vec<_> = run.outcome.log.snapshots().collect();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1].time, 247);
    assert_eq!(
        snapshots[1].rows,
        vec![
            SnapshotRow {
                pcb: Pcb::new(1, Some(0), "program1", 10).placed_in(3),
                state: ProcessState::Running,
            },
            SnapshotRow {
                pcb: Pcb::new(0, None, "init", 1).placed_in(1),
                state: ProcessState::Waiting,
            },
        ]
    );
    assert!(execution_text(&run.outcome.log).ends_with("247, 100, CPU Burst\n347, 7, CPU Burst\n"));
    assert_eq!(run.outcome.end_time, 354);

    assert_eq!(
        run.memory.get(1).map(|p| p.occupant.clone()),
        Some(Occupant::Program("init".into()))
    );
    assert!((2..=6).all(|n| run.memory.is_free(n)));
}

#[test]
fn test_fork_inside_exec_image() {
    let run = with_program1(
        "FORK, 10\nIF_CHILD, 0\nCPU, 5\nIF_PARENT, 0\nCPU, 7\nENDIF, 0\n",
    )
    .run("FORK, 10\nIF_CHILD, 0\nEXEC program1, 50\nIF_PARENT, 0\nCPU, 7\nENDIF, 0\n");

    let snapshots: Vec<_> = run.outcome.log.snapshots().collect();
    assert_eq!(snapshots.len(), 3);

    let nested = snapshots[2];
    assert_eq!(nested.time, 271);
    let rows: Vec<(u32, &str, Option<usize>, ProcessState)> = nested
        .rows
        .iter()
        .map(|r| (r.pcb.pid, r.pcb.program_name.as_str(), r.pcb.partition, r.state))
        .collect();
    assert_eq!(
        rows,
        vec![
            (2, "program1", Some(2), ProcessState::Running),
            (1, "program1", Some(3), ProcessState::Waiting),
            (0, "init", Some(1), ProcessState::Waiting),
        ]
    );
    assert_eq!(run.outcome.end_time, 290);
}

#[test]
fn test_stats_count_exec_outcomes() {
    let fixture = with_program1("EXEC missing, 1\n");
    let mut sim = fixture.simulator();
    let root = sim.bootstrap_process();
    let _ = sim
        .simulate(&trace("EXEC program1, 50\n"), 0, &root, &WaitQueue::new())
        .unwrap();

    let stats = sim.stats();
    assert_eq!(stats.execs, 2);
    assert_eq!(stats.exec_unknown_program, 1);
    assert_eq!(stats.exec_failures, 0);
    assert_eq!(stats.max_depth, 1);
}
