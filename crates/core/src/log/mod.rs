//! Structured simulation log.
//!
//! The engine never builds output text. It appends typed records to a [`SimLog`]:
//! 1. **Steps:** Timed kernel or user steps (`time, duration, description`).
//! 2. **Errors:** Non-fatal event failures (`time, message`).
//! 3. **Snapshots:** Process tables captured after FORK and EXEC.
//!
//! [`render`] turns a log into the execution and status artifacts.

/// Text rendering of the two output artifacts.
pub mod render;

use crate::common::Time;
use crate::process::Pcb;
use crate::trace::TraceEvent;

/// Scheduling state shown in a status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Owns the CPU.
    Running,
    /// Suspended until the running process finishes its trace slice.
    Waiting,
}

impl ProcessState {
    /// Label used in the status table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Waiting => "waiting",
        }
    }
}

/// One row of a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    /// Process as it was when the snapshot was taken.
    pub pcb: Pcb,
    /// Its state at that instant.
    pub state: ProcessState,
}

/// Process table captured after a FORK or EXEC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Clock value after the event's last step.
    pub time: Time,
    /// The event that triggered the snapshot.
    pub event: TraceEvent,
    /// Running process first, then waiting ones.
    pub rows: Vec<SnapshotRow>,
}

/// One entry of the simulation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// A timed step starting at `time` and lasting `duration`.
    Step {
        /// Clock value when the step starts.
        time: Time,
        /// Time charged.
        duration: u64,
        /// What happened.
        description: String,
    },
    /// A non-fatal failure of the current event.
    Error {
        /// Clock value when the failure was detected.
        time: Time,
        /// What failed.
        message: String,
    },
    /// A process table snapshot.
    Snapshot(StatusSnapshot),
}

/// Append-only, ordered log of one simulation (or of one recursion level).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimLog {
    records: Vec<LogRecord>,
}

impl SimLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a timed step.
    pub fn step(&mut self, time: Time, duration: u64, description: impl Into<String>) {
        self.records.push(LogRecord::Step {
            time,
            duration,
            description: description.into(),
        });
    }

    /// Appends an error record.
    pub fn error(&mut self, time: Time, message: impl Into<String>) {
        self.records.push(LogRecord::Error {
            time,
            message: message.into(),
        });
    }

    /// Appends a status snapshot.
    pub fn snapshot(&mut self, snapshot: StatusSnapshot) {
        self.records.push(LogRecord::Snapshot(snapshot));
    }

    /// Moves every record of `other` to the end of this log.
    pub fn append(&mut self, other: Self) {
        self.records.extend(other.records);
    }

    /// All records in order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Timed steps only.
    pub fn steps(&self) -> impl Iterator<Item = &LogRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r, LogRecord::Step { .. }))
    }

    /// Error records only.
    pub fn errors(&self) -> impl Iterator<Item = &LogRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r, LogRecord::Error { .. }))
    }

    /// Snapshots only.
    pub fn snapshots(&self) -> impl Iterator<Item = &StatusSnapshot> {
        self.records.iter().filter_map(|r| match r {
            LogRecord::Snapshot(s) => Some(s),
            _ => None,
        })
    }
}
