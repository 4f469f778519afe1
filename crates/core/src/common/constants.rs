//! Fixed costs and placeholder values.
//!
//! These are the built-in timings of the simulated kernel. Most of them can be
//! overridden through [`crate::config::TimingConfig`]; the ones here are the
//! defaults it falls back to.

/// Cost of switching the CPU into kernel mode.
pub const KERNEL_SWITCH_COST: u64 = 1;

/// Cost of looking up a vector in the vector table.
pub const VECTOR_LOOKUP_COST: u64 = 1;

/// Cost of loading an ISR address into the PC.
pub const VECTOR_LOAD_COST: u64 = 1;

/// Cost of returning from an interrupt.
pub const IRET_COST: u64 = 1;

/// Cost of invoking the scheduler. The step is logged but free.
pub const SCHEDULER_COST: u64 = 0;

/// Time spent saving context on interrupt entry.
pub const CONTEXT_SAVE_TIME: u64 = 10;

/// Vector used by the FORK system call.
pub const FORK_VECTOR: usize = 2;

/// Vector used by the EXEC system call.
pub const EXEC_VECTOR: usize = 3;

/// Time to load one size unit (Mb) of a program image into memory.
pub const LOAD_COST_PER_UNIT: u64 = 15;

/// Cost of tagging a partition with its new occupant.
pub const MARK_PARTITION_COST: u64 = 3;

/// Cost of rewriting the PCB after an exec.
pub const UPDATE_PCB_COST: u64 = 6;

/// Base address of the vector table.
pub const VECTOR_BASE: u64 = 0;

/// Size in bytes of one vector table entry.
pub const VECTOR_SIZE: u64 = 2;

/// Capacities of the default partition table, in partition-number order.
pub const DEFAULT_PARTITIONS: [u32; 6] = [40, 25, 15, 10, 8, 2];

/// Occupant tag of a free partition.
pub const EMPTY_TAG: &str = "empty";
