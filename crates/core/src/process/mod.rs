//! Process model.
//!
//! This module provides:
//! 1. **PCBs:** Identity and memory placement of one process.
//! 2. **Wait Queues:** The processes suspended relative to one recursion level, and pid generation.
//! 3. **Catalog:** External programs an EXEC can load, with their sizes and trace files.

/// External program catalog.
pub mod catalog;

/// Process control blocks and wait queues.
pub mod pcb;

pub use catalog::{ExternalProgram, ProgramCatalog, get_program_size};
pub use pcb::{Pcb, Pid, WaitQueue, next_pid};
