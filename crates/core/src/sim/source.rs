//! Where EXEC finds the traces of external programs.

use std::collections::HashMap;
use std::fmt;

use crate::common::SimError;
use crate::process::ExternalProgram;
use crate::trace::TraceEvent;

/// Supplies the trace of a program an EXEC is about to run.
pub trait TraceSource: fmt::Debug {
    /// Loads and decodes the trace of `program`.
    fn load(&self, program: &ExternalProgram) -> Result<Vec<TraceEvent>, SimError>;
}

/// In-memory traces keyed by program name.
///
/// A program without an entry runs an empty trace.
#[derive(Debug, Clone, Default)]
pub struct MemoryTraceSource {
    traces: HashMap<String, Vec<TraceEvent>>,
}

impl MemoryTraceSource {
    /// Creates a source with no traces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the trace of `name`, replacing any previous one.
    #[must_use]
    pub fn with_trace(mut self, name: impl Into<String>, trace: Vec<TraceEvent>) -> Self {
        let _ = self.traces.insert(name.into(), trace);
        self
    }
}

impl TraceSource for MemoryTraceSource {
    fn load(&self, program: &ExternalProgram) -> Result<Vec<TraceEvent>, SimError> {
        Ok(self.traces.get(&program.name).cloned().unwrap_or_default())
    }
}
