//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Fixed step costs charged by the interrupt and exec paths.
//! 2. **Error Handling:** The `SimError` type for input-contract and I/O failures.
//! 3. **Time:** The virtual clock unit and overflow-checked advancement.

/// Fixed step costs and table defaults.
pub mod constants;

/// Error types.
pub mod error;

pub use error::SimError;

/// Virtual clock value in simulated milliseconds.
pub type Time = u64;

/// Moves the clock `duration` past `time`, refusing to wrap.
pub const fn advance(time: Time, duration: u64) -> Result<Time, SimError> {
    match time.checked_add(duration) {
        Some(after) => Ok(after),
        None => Err(SimError::ClockOverflow { time, duration }),
    }
}
