//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** The built-in costs, vector addressing, and partition layout.
//! 2. **Structures:** Hierarchical config for timing, vector table, memory, and bootstrap process.
//! 3. **Loading:** JSON deserialization with per-field defaults and validation.
//!
//! The CLI uses `Config::default()` unless a JSON file is supplied with `--config`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;
use crate::common::constants;

/// Default configuration values not covered by [`constants`].
mod defaults {
    /// Program image the bootstrap process starts with.
    pub const BOOTSTRAP_PROGRAM: &str = "init";

    /// Footprint of the bootstrap process.
    pub const BOOTSTRAP_SIZE: u32 = 1;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use ossim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.timing.context_save_time, 10);
/// assert_eq!(config.memory.partitions, vec![40, 25, 15, 10, 8, 2]);
/// ```
///
/// Deserializing a partial JSON document; omitted fields keep their defaults:
///
/// ```
/// use ossim_core::config::Config;
///
/// let json = r#"{
///     "timing": { "context_save_time": 20 },
///     "memory": { "partitions": [100, 50] }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.timing.context_save_time, 20);
/// assert_eq!(config.timing.fork_vector, 2);
/// assert_eq!(config.memory.partitions, vec![100, 50]);
/// assert_eq!(config.bootstrap.program_name, "init");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interrupt and system call step costs.
    pub timing: TimingConfig,
    /// Vector table addressing.
    pub vector: VectorConfig,
    /// Partition table layout.
    pub memory: MemoryConfig,
    /// The root process created by the driver.
    pub bootstrap: BootstrapConfig,
}

impl Config {
    /// Reads and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects layouts the allocator cannot work with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.memory.partitions.is_empty() {
            return Err(SimError::Config(
                "partition table must have at least one partition".into(),
            ));
        }
        if let Some(i) = self.memory.partitions.iter().position(|&c| c == 0) {
            return Err(SimError::Config(format!(
                "partition {} has zero capacity",
                i + 1
            )));
        }
        if self.vector.entry_size == 0 {
            return Err(SimError::Config("vector entry size must be non-zero".into()));
        }
        if self.bootstrap.program_name.trim().is_empty() {
            return Err(SimError::Config("bootstrap program name is empty".into()));
        }
        Ok(())
    }
}

/// Costs charged by the interrupt, fork, and exec paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Time to save context on interrupt entry.
    pub context_save_time: u64,
    /// Switch into kernel mode.
    pub kernel_switch: u64,
    /// Vector table lookup.
    pub vector_lookup: u64,
    /// Loading the ISR address into the PC.
    pub vector_load: u64,
    /// Return from interrupt.
    pub iret: u64,
    /// Scheduler invocation.
    pub scheduler: u64,
    /// Vector raised by FORK.
    pub fork_vector: usize,
    /// Vector raised by EXEC.
    pub exec_vector: usize,
    /// Load time per size unit of an exec'd image.
    pub load_per_unit: u64,
    /// Tagging a partition as occupied.
    pub mark_partition: u64,
    /// Rewriting the PCB after exec.
    pub update_pcb: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            context_save_time: constants::CONTEXT_SAVE_TIME,
            kernel_switch: constants::KERNEL_SWITCH_COST,
            vector_lookup: constants::VECTOR_LOOKUP_COST,
            vector_load: constants::VECTOR_LOAD_COST,
            iret: constants::IRET_COST,
            scheduler: constants::SCHEDULER_COST,
            fork_vector: constants::FORK_VECTOR,
            exec_vector: constants::EXEC_VECTOR,
            load_per_unit: constants::LOAD_COST_PER_UNIT,
            mark_partition: constants::MARK_PARTITION_COST,
            update_pcb: constants::UPDATE_PCB_COST,
        }
    }
}

impl TimingConfig {
    /// Total clock advance of one ISR dispatch, excluding the device's own service time.
    pub const fn dispatch_cost(&self) -> u64 {
        self.kernel_switch + self.context_save_time + self.vector_lookup + self.vector_load
    }
}

/// Where vector table entries live in the simulated address space.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Address of entry 0.
    pub base: u64,
    /// Bytes per entry.
    pub entry_size: u64,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            base: constants::VECTOR_BASE,
            entry_size: constants::VECTOR_SIZE,
        }
    }
}

impl VectorConfig {
    /// Memory position of vector `index`.
    pub const fn address_of(&self, index: usize) -> u64 {
        self.base + index as u64 * self.entry_size
    }
}

/// Fixed partition layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Capacity of each partition; partition numbers are positions starting at 1.
    pub partitions: Vec<u32>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            partitions: constants::DEFAULT_PARTITIONS.to_vec(),
        }
    }
}

/// The root process the driver places before simulating.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Initial program image.
    pub program_name: String,
    /// Initial footprint.
    pub size: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            program_name: defaults::BOOTSTRAP_PROGRAM.to_string(),
            size: defaults::BOOTSTRAP_SIZE,
        }
    }
}
