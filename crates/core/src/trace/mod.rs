//! Trace events and parsing.
//!
//! A trace is the script one process follows. Each line names an activity and,
//! optionally, a numeric parameter and an operand (the program an EXEC loads).

/// Activity kinds and decoded events.
pub mod event;

/// Line and file parsing.
pub mod parser;

pub use event::{Activity, TraceEvent};
pub use parser::{parse_line, parse_trace};
