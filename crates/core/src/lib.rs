//! Trace-driven fork/exec simulator library.
//!
//! This crate replays a scripted trace of process events on a virtual single-CPU system:
//! 1. **Trace:** Decoding of trace lines into typed events (CPU, SYSCALL, END_IO, FORK, EXEC, markers).
//! 2. **Interrupts:** Fixed-cost ISR dispatch boilerplate driven by a vector table.
//! 3. **Memory:** A fixed partition table with first-fit allocation.
//! 4. **Processes:** PCBs, wait queues, pid generation, and the external program catalog.
//! 5. **Simulation:** The recursive interpreter, file loader, and run statistics.
//! 6. **Log:** Typed execution/status records and their text renderings.

/// Common types and constants (errors, cost constants, time).
pub mod common;
/// Simulator configuration (costs, vector addressing, partition layout, bootstrap process).
pub mod config;
/// Interrupt service routine dispatch and its cost model.
pub mod interrupt;
/// Structured execution and status log.
pub mod log;
/// Memory partition table and allocator.
pub mod memory;
/// Process control blocks, wait queues, and the external program catalog.
pub mod process;
/// Simulation engine and input loading.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Trace events and the line parser.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error type shared by every fallible operation in the crate.
pub use crate::common::SimError;
/// Main engine type; owns the partition table and interprets traces.
pub use crate::sim::Simulator;
