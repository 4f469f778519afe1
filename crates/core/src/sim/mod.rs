//! Simulation engine and input loading.
//!
//! Provides the recursive interpreter, the FORK trace splitter, and the
//! sources EXEC pulls external program traces from.

/// Recursive trace interpreter.
pub mod engine;

/// FORK branch splitting.
pub mod fork;

/// Input files and the filesystem trace source.
pub mod loader;

/// External program trace sources.
pub mod source;

pub use engine::{Outcome, Simulator};
pub use fork::{ForkSplit, split_fork};
pub use loader::FsTraceSource;
pub use source::{MemoryTraceSource, TraceSource};
