//! Simulation statistics collection and reporting.
//!
//! This module tracks what a run did. It provides:
//! 1. **Event mix:** Counts of CPU bursts, system calls, I/O completions, forks, and execs.
//! 2. **Time breakdown:** Virtual time spent in user bursts versus kernel steps.
//! 3. **Memory:** Allocation failures for FORK and EXEC, and unknown EXEC targets.
//! 4. **Processes:** Processes created and the deepest fork/exec nesting reached.

use std::time::Instant;

use crate::common::Time;

/// Statistics for one simulation run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Clock value when the root trace finished.
    pub end_time: Time,

    /// CPU lines executed.
    pub cpu_bursts: u64,
    /// SYSCALL lines executed.
    pub syscalls: u64,
    /// END_IO lines executed.
    pub io_completions: u64,
    /// FORK lines executed, successful or not.
    pub forks: u64,
    /// EXEC lines executed, successful or not.
    pub execs: u64,

    /// Virtual time spent in CPU bursts.
    pub time_user: u64,
    /// Virtual time spent in every other step.
    pub time_kernel: u64,

    /// FORKs that found no partition for the child.
    pub fork_failures: u64,
    /// EXECs that found no partition for the new image.
    pub exec_failures: u64,
    /// EXECs naming a program missing from the catalog.
    pub exec_unknown_program: u64,
    /// EXECs whose catalogued trace file does not exist.
    pub exec_missing_trace: u64,

    /// Processes created by FORK.
    pub processes_created: u64,
    /// Deepest recursion level reached; the root trace is level 0.
    pub max_depth: usize,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: 0,
            cpu_bursts: 0,
            syscalls: 0,
            io_completions: 0,
            forks: 0,
            execs: 0,
            time_user: 0,
            time_kernel: 0,
            fork_failures: 0,
            exec_failures: 0,
            exec_unknown_program: 0,
            exec_missing_trace: 0,
            processes_created: 0,
            max_depth: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "events", "memory"];

impl SimStats {
    /// Records the nesting level of a newly entered trace.
    pub fn enter(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Interpreted (non-marker) events.
    pub const fn events(&self) -> u64 {
        self.cpu_bursts + self.syscalls + self.io_completions + self.forks + self.execs
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"events"`, or `"memory"`.
    /// Pass an empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let busy = (self.time_user + self.time_kernel).max(1);
        let events = self.events().max(1);

        if want("summary") {
            println!("\n==========================================================");
            println!("FORK/EXEC SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_time                 {}", self.end_time);
            println!(
                "time.user                {} ({:.2}%)",
                self.time_user,
                (self.time_user as f64 / busy as f64) * 100.0
            );
            println!(
                "time.kernel              {} ({:.2}%)",
                self.time_kernel,
                (self.time_kernel as f64 / busy as f64) * 100.0
            );
            println!("processes.created        {}", self.processes_created);
            println!("processes.max_depth      {}", self.max_depth);
            println!("----------------------------------------------------------");
        }
        if want("events") {
            let total = events as f64;
            println!("EVENT MIX");
            for (name, count) in [
                ("ev.cpu", self.cpu_bursts),
                ("ev.syscall", self.syscalls),
                ("ev.end_io", self.io_completions),
                ("ev.fork", self.forks),
                ("ev.exec", self.execs),
            ] {
                println!(
                    "  {:<22} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / total) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            println!("MEMORY");
            println!("  fork.no_partition      {}", self.fork_failures);
            println!("  exec.no_partition      {}", self.exec_failures);
            println!("  exec.unknown_program   {}", self.exec_unknown_program);
            println!("  exec.missing_trace     {}", self.exec_missing_trace);
        }
        println!("==========================================================");
    }
}
