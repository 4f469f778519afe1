//! Simulator error definitions.
//!
//! Everything here is fatal to a run. Resource exhaustion during FORK or EXEC and
//! unknown EXEC targets are not errors in this sense: the engine records them as
//! [`crate::log::LogRecord::Error`] entries and keeps going.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal simulator errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be read or written.
    #[error("could not access '{}': {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A trace line does not follow `ACTIVITY[, PARAMETER][, NAME]`.
    #[error("malformed trace line {line_no}: '{line}' ({reason})")]
    MalformedTrace {
        /// 1-based line number within its file, or 0 for a line parsed in isolation.
        line_no: usize,
        /// The offending line, trimmed.
        line: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A vector table, device table, or program catalog line could not be decoded.
    #[error("malformed {table} entry at line {line_no}: '{line}'")]
    MalformedTable {
        /// Which table the line belongs to.
        table: &'static str,
        /// 1-based line number.
        line_no: usize,
        /// The offending line, trimmed.
        line: String,
    },

    /// An interrupt referenced a vector the vector table does not have.
    #[error("vector {index} is out of range (vector table has {len} entries)")]
    UnknownVector {
        /// Requested vector.
        index: usize,
        /// Number of entries in the vector table.
        len: usize,
    },

    /// An interrupt referenced a device the delay table does not have.
    #[error("device {index} is out of range (device table has {len} entries)")]
    UnknownDevice {
        /// Requested device number.
        index: usize,
        /// Number of entries in the device table.
        len: usize,
    },

    /// Advancing the virtual clock would exceed `u64::MAX`.
    #[error("virtual clock overflow: {time} + {duration} does not fit in 64 bits")]
    ClockOverflow {
        /// Clock value before the step.
        time: u64,
        /// Duration that could not be added.
        duration: u64,
    },

    /// The configuration is unreadable or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SimError {
    /// Wraps an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is an I/O failure caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
