//! Text rendering of the execution and status artifacts.
//!
//! Execution lines are `time, duration, description`; error lines drop the
//! duration. Status snapshots are fixed-width tables:
//!
//! ```text
//! time: 24; current trace: FORK, 10
//! +------------------------------------------------------+
//! | PID |program name |partition number | size |   state |
//! +------------------------------------------------------+
//! |   1 |        init |               2 |    1 | running |
//! |   0 |        init |               1 |    1 | waiting |
//! +------------------------------------------------------+
//! ```

use std::fmt;

use crate::log::{LogRecord, SimLog, SnapshotRow, StatusSnapshot};

const SEPARATOR: &str = "+------------------------------------------------------+";
const HEADER: &str = "| PID |program name |partition number | size |   state |";

/// Displays the execution artifact of a log.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionText<'a>(pub &'a SimLog);

impl fmt::Display for ExecutionText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.0.records() {
            match record {
                LogRecord::Step {
                    time,
                    duration,
                    description,
                } => writeln!(f, "{time}, {duration}, {description}")?,
                LogRecord::Error { time, message } => writeln!(f, "{time}, {message}")?,
                LogRecord::Snapshot(_) => {}
            }
        }
        Ok(())
    }
}

/// Displays the status artifact of a log.
#[derive(Debug, Clone, Copy)]
pub struct StatusText<'a>(pub &'a SimLog);

impl fmt::Display for StatusText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for snapshot in self.0.snapshots() {
            write_snapshot(f, snapshot)?;
        }
        Ok(())
    }
}

fn write_snapshot(f: &mut fmt::Formatter<'_>, snapshot: &StatusSnapshot) -> fmt::Result {
    writeln!(
        f,
        "time: {}; current trace: {}",
        snapshot.time, snapshot.event
    )?;
    writeln!(f, "{SEPARATOR}")?;
    writeln!(f, "{HEADER}")?;
    writeln!(f, "{SEPARATOR}")?;
    for row in &snapshot.rows {
        write_row(f, row)?;
    }
    writeln!(f, "{SEPARATOR}")?;
    writeln!(f)
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &SnapshotRow) -> fmt::Result {
    let partition = row
        .pcb
        .partition
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    writeln!(
        f,
        "|{:>4} |{:>12} |{:>16} |{:>5} |{:>8} |",
        row.pcb.pid,
        row.pcb.program_name,
        partition,
        row.pcb.size,
        row.state.label()
    )
}

/// Renders the execution artifact.
pub fn execution_text(log: &SimLog) -> String {
    ExecutionText(log).to_string()
}

/// Renders the status artifact.
pub fn status_text(log: &SimLog) -> String {
    StatusText(log).to_string()
}
