use std::path::{Path, PathBuf};

use ossim_core::process::{
    ExternalProgram, Pcb, ProgramCatalog, WaitQueue, get_program_size, next_pid,
};
use pretty_assertions::assert_eq;

fn pcb(pid: u32) -> Pcb {
    Pcb::new(pid, Some(0), "init", 1)
}

#[test]
fn test_next_pid_from_lone_process() {
    assert_eq!(next_pid(&WaitQueue::new(), &Pcb::new(0, None, "init", 1)), 1);
}

#[test]
fn test_next_pid_is_one_past_largest() {
    let queue: WaitQueue = [pcb(0), pcb(7), pcb(3)].into_iter().collect();
    assert_eq!(next_pid(&queue, &pcb(2)), 8);
    assert_eq!(next_pid(&queue, &pcb(9)), 10);
}

#[test]
fn test_fork_child_inherits_image() {
    let parent = Pcb::new(4, Some(1), "editor", 12).placed_in(2);
    let child = parent.fork_child(5, 3);
    assert_eq!(child, Pcb::new(5, Some(4), "editor", 12).placed_in(3));
}

#[test]
fn test_exec_image_keeps_identity() {
    let before = Pcb::new(4, Some(1), "init", 1).placed_in(1);
    let after = before.exec_image("program1", 10, 2);
    assert_eq!(after.pid, 4);
    assert_eq!(after.ppid, Some(1));
    assert_eq!(after.program_name, "program1");
    assert_eq!(after.size, 10);
    assert_eq!(after.partition, Some(2));
}

#[test]
fn test_wait_queue_copies_are_independent() {
    let base: WaitQueue = [pcb(0)].into_iter().collect();
    let grown = base.with(pcb(1));
    let shrunk = grown.without(0);

    assert_eq!(base.len(), 1);
    assert_eq!(grown.len(), 2);
    assert!(grown.contains(0) && grown.contains(1));
    assert_eq!(shrunk.iter().map(|p| p.pid).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_wait_queue_partition_holders() {
    let queue: WaitQueue = [pcb(0).placed_in(3), pcb(1)].into_iter().collect();
    assert!(queue.holds_partition(3));
    assert!(!queue.holds_partition(1));
}

#[test]
fn test_catalog_lookup() {
    let catalog: ProgramCatalog = [
        ExternalProgram::new("program1", 10),
        ExternalProgram::new("program2", 15),
        ExternalProgram::new("program1", 99),
    ]
    .into_iter()
    .collect();

    assert_eq!(catalog.len(), 3);
    assert_eq!(get_program_size("program1", &catalog), 10);
    assert_eq!(get_program_size("program2", &catalog), 15);
    assert_eq!(get_program_size("missing", &catalog), 0);
    assert_eq!(get_program_size("", &ProgramCatalog::new()), 0);
}

#[test]
fn test_catalog_display_lists_programs() {
    let mut catalog = ProgramCatalog::new();
    catalog.insert(ExternalProgram::new("program1", 10));
    let table = catalog.to_string();
    assert!(table.contains("| program1            |     10 |"));
}

#[test]
fn test_trace_path_resolution() {
    let dir = Path::new("/programs");
    let default = ExternalProgram::new("program1", 10);
    assert_eq!(
        default.resolve_trace_path(dir),
        PathBuf::from("/programs/program1.txt")
    );

    let relative = ExternalProgram {
        trace_path: Some(PathBuf::from("traces/p1.trace")),
        ..default.clone()
    };
    assert_eq!(
        relative.resolve_trace_path(dir),
        PathBuf::from("/programs/traces/p1.trace")
    );

    let absolute = ExternalProgram {
        trace_path: Some(PathBuf::from("/elsewhere/p1.txt")),
        ..default
    };
    assert_eq!(
        absolute.resolve_trace_path(dir),
        PathBuf::from("/elsewhere/p1.txt")
    );
}
