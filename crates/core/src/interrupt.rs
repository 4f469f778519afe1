//! Interrupt service routine dispatch.
//!
//! Every interrupt-class event (SYSCALL, END_IO, FORK, EXEC) enters the kernel
//! through the same four steps:
//! 1. **Mode switch:** `switch to kernel mode`.
//! 2. **Context save:** `context saved`, costed by the caller.
//! 3. **Vector lookup:** `find vector N in memory position 0xHHHH`.
//! 4. **Vector load:** `load address <ISR> into the PC`.
//!
//! The device's own service time is not part of the boilerplate; callers charge
//! it from the [`DeviceTable`].

use crate::common::{SimError, Time, advance};
use crate::config::Config;
use crate::log::SimLog;

/// ISR addresses indexed by vector number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorTable {
    addresses: Vec<String>,
}

impl VectorTable {
    /// Creates a table from addresses in vector order.
    pub const fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }

    /// ISR address for `vector`.
    pub fn address(&self, vector: usize) -> Result<&str, SimError> {
        self.addresses
            .get(vector)
            .map(String::as_str)
            .ok_or(SimError::UnknownVector {
                index: vector,
                len: self.addresses.len(),
            })
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Service delay of each device, indexed by device number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceTable {
    delays: Vec<u64>,
}

impl DeviceTable {
    /// Creates a table from delays in device order.
    pub const fn new(delays: Vec<u64>) -> Self {
        Self { delays }
    }

    /// Service delay of `device`.
    pub fn delay(&self, device: usize) -> Result<u64, SimError> {
        self.delays
            .get(device)
            .copied()
            .ok_or(SimError::UnknownDevice {
                index: device,
                len: self.delays.len(),
            })
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

/// Logs the kernel entry boilerplate for `vector` starting at `current_time`.
///
/// # Arguments
///
/// * `current_time` - Clock value when the interrupt is raised.
/// * `context_save_time` - Cost of the context save step.
/// * `vector` - Vector number to look up.
/// * `vectors` - The vector table.
/// * `config` - Step costs and vector addressing.
///
/// # Returns
///
/// The four boilerplate steps and the clock value after them.
pub fn dispatch(
    current_time: Time,
    context_save_time: u64,
    vector: usize,
    vectors: &VectorTable,
    config: &Config,
) -> Result<(SimLog, Time), SimError> {
    let address = vectors.address(vector)?;
    let timing = &config.timing;
    let mut log = SimLog::new();
    let mut time = current_time;

    log.step(time, timing.kernel_switch, "switch to kernel mode");
    time = advance(time, timing.kernel_switch)?;

    log.step(time, context_save_time, "context saved");
    time = advance(time, context_save_time)?;

    log.step(
        time,
        timing.vector_lookup,
        format!(
            "find vector {vector} in memory position {:#06X}",
            config.vector.address_of(vector)
        ),
    );
    time = advance(time, timing.vector_lookup)?;

    log.step(
        time,
        timing.vector_load,
        format!("load address {address} into the PC"),
    );
    time = advance(time, timing.vector_load)?;

    Ok((log, time))
}
