//! Partition table and first-fit allocator.
//!
//! The table is a plain value owned by the simulator. Callers that allocate
//! or free hold it by `&mut`; nothing about it is global.

use std::fmt;

use tracing::debug;

use crate::common::constants::{DEFAULT_PARTITIONS, EMPTY_TAG};
use crate::config::MemoryConfig;
use crate::process::{Pcb, WaitQueue};

/// Who is loaded into a partition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Occupant {
    /// Nothing.
    #[default]
    Empty,
    /// The named program image.
    Program(String),
}

impl Occupant {
    /// Whether the partition is free.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str(EMPTY_TAG),
            Self::Program(name) => f.write_str(name),
        }
    }
}

/// One fixed-size slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// 1-based partition number.
    pub number: usize,
    /// Capacity in size units.
    pub capacity: u32,
    /// Current occupant tag.
    pub occupant: Occupant,
}

/// The fixed, ordered set of partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTable {
    partitions: Vec<Partition>,
}

impl Default for PartitionTable {
    fn default() -> Self {
        Self::new(&DEFAULT_PARTITIONS)
    }
}

impl PartitionTable {
    /// Builds an all-empty table; partition `i + 1` gets `capacities[i]`.
    pub fn new(capacities: &[u32]) -> Self {
        Self {
            partitions: capacities
                .iter()
                .enumerate()
                .map(|(i, &capacity)| Partition {
                    number: i + 1,
                    capacity,
                    occupant: Occupant::Empty,
                })
                .collect(),
        }
    }

    /// Builds the table described by the configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(&config.partitions)
    }

    /// Partition `number`, if it exists.
    pub fn get(&self, number: usize) -> Option<&Partition> {
        number
            .checked_sub(1)
            .and_then(|i| self.partitions.get(i))
    }

    fn get_mut(&mut self, number: usize) -> Option<&mut Partition> {
        number
            .checked_sub(1)
            .and_then(|i| self.partitions.get_mut(i))
    }

    /// Whether partition `number` exists and is empty.
    pub fn is_free(&self, number: usize) -> bool {
        self.get(number).is_some_and(|p| p.occupant.is_empty())
    }

    /// Partitions in number order.
    pub fn iter(&self) -> std::slice::Iter<'_, Partition> {
        self.partitions.iter()
    }

    /// Number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Whether the table has no partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// First partition, in number order, that can take `requested_size`.
    ///
    /// A candidate must be large enough, tagged empty, and not held by any
    /// process in `wait_queue`. `None` is an ordinary outcome, not an error.
    pub fn find_available_partition(
        &self,
        requested_size: u32,
        wait_queue: &WaitQueue,
    ) -> Option<usize> {
        self.partitions
            .iter()
            .find(|p| {
                p.capacity >= requested_size
                    && p.occupant.is_empty()
                    && !wait_queue.holds_partition(p.number)
            })
            .map(|p| p.number)
    }

    /// Places the bootstrap process.
    ///
    /// On success the partition is tagged with the process's program and the
    /// PCB records its number.
    pub fn allocate_memory(&mut self, pcb: &mut Pcb) -> Option<usize> {
        let number = self.find_available_partition(pcb.size, &WaitQueue::new())?;
        self.occupy(number, &pcb.program_name);
        pcb.partition = Some(number);
        Some(number)
    }

    /// Tags partition `number` with `program`.
    pub fn occupy(&mut self, number: usize, program: &str) {
        if let Some(p) = self.get_mut(number) {
            debug!(partition = number, program, "partition occupied");
            p.occupant = Occupant::Program(program.to_string());
        }
    }

    /// Tags partition `number` as empty.
    pub fn free(&mut self, number: usize) {
        if let Some(p) = self.get_mut(number) {
            debug!(partition = number, "partition freed");
            p.occupant = Occupant::Empty;
        }
    }
}
