//! Fixed-partition memory.
//!
//! Memory is a short, fixed list of partitions numbered from 1. Each holds at
//! most one program image; allocation is first-fit in partition order.

/// Partition table and allocator.
pub mod partition;

pub use partition::{Occupant, Partition, PartitionTable};
