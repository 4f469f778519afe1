//! Splitting a trace at a FORK into the child's branch and the parent's continuation.
//!
//! Scanning starts at the FORK line:
//! - `IF_CHILD` starts collecting lines for the child.
//! - `IF_PARENT` stops collecting and marks where the parent continues.
//! - `ENDIF` resumes collecting: the shared tail runs in the child too.
//! - An `EXEC` met while collecting is kept and ends the child's branch; the
//!   next `IF_PARENT` then ends the scan.

use crate::trace::{Activity, TraceEvent};

/// Result of splitting a trace at a FORK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkSplit {
    /// Lines the child runs.
    pub child: Vec<TraceEvent>,
    /// Index where the parent resumes in the forked trace.
    pub resume: usize,
}

/// Splits `trace` at the FORK on line `fork_at`.
///
/// The parent resumes right after the last `IF_PARENT` the scan saw. Without
/// one, it resumes after the FORK when no `IF_CHILD` was seen either, and at
/// the end of the trace otherwise (everything left belonged to the child).
pub fn split_fork(trace: &[TraceEvent], fork_at: usize) -> ForkSplit {
    let mut child = Vec::new();
    let mut collecting = false;
    let mut exec_seen = false;
    let mut child_seen = false;
    let mut parent_at = None;

    for (j, event) in trace.iter().enumerate().skip(fork_at) {
        match event.activity {
            Activity::IfChild if !collecting => {
                collecting = true;
                child_seen = true;
                continue;
            }
            Activity::IfParent => {
                collecting = false;
                parent_at = Some(j);
                if exec_seen {
                    break;
                }
            }
            Activity::EndIf if !collecting => {
                collecting = true;
                continue;
            }
            Activity::Exec if collecting => {
                collecting = false;
                exec_seen = true;
                child.push(event.clone());
            }
            _ => {}
        }

        if collecting {
            child.push(event.clone());
        }
    }

    let resume = match parent_at {
        Some(j) => j + 1,
        None if child_seen => trace.len(),
        None => fork_at + 1,
    };

    ForkSplit { child, resume }
}
