//! Input loading.
//!
//! This module reads the four inputs of a run from disk. It performs:
//! 1. **Traces:** The root trace and, on EXEC, the traces of external programs.
//! 2. **Vector table:** One ISR address per line, indexed by line order.
//! 3. **Device table:** One service delay per line, indexed by device number.
//! 4. **Program catalog:** `name, size[, path]` per line.
//!
//! Blank lines are skipped everywhere. The `parse_*` functions take file
//! contents directly; the `load_*` functions read a path first.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::SimError;
use crate::interrupt::{DeviceTable, VectorTable};
use crate::process::{ExternalProgram, ProgramCatalog};
use crate::sim::source::TraceSource;
use crate::trace::{TraceEvent, parse_trace};

fn read(path: &Path) -> Result<String, SimError> {
    fs::read_to_string(path).map_err(|e| SimError::io(path, e))
}

fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Reads and decodes a trace file.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEvent>, SimError> {
    let path = path.as_ref();
    let trace = parse_trace(&read(path)?)?;
    debug!(path = %path.display(), lines = trace.len(), "trace loaded");
    Ok(trace)
}

/// Decodes vector table contents.
pub fn parse_vector_table(text: &str) -> Result<VectorTable, SimError> {
    content_lines(text)
        .map(|(line_no, line)| {
            if line.split_whitespace().count() == 1 && !line.contains(',') {
                Ok(line.to_string())
            } else {
                Err(SimError::MalformedTable {
                    table: "vector table",
                    line_no,
                    line: line.to_string(),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(VectorTable::new)
}

/// Reads a vector table file.
pub fn load_vector_table(path: impl AsRef<Path>) -> Result<VectorTable, SimError> {
    parse_vector_table(&read(path.as_ref())?)
}

/// Decodes device table contents.
pub fn parse_device_table(text: &str) -> Result<DeviceTable, SimError> {
    content_lines(text)
        .map(|(line_no, line)| {
            line.parse::<u64>().map_err(|_| SimError::MalformedTable {
                table: "device table",
                line_no,
                line: line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(DeviceTable::new)
}

/// Reads a device table file.
pub fn load_device_table(path: impl AsRef<Path>) -> Result<DeviceTable, SimError> {
    parse_device_table(&read(path.as_ref())?)
}

/// Decodes program catalog contents.
pub fn parse_catalog(text: &str) -> Result<ProgramCatalog, SimError> {
    content_lines(text)
        .map(|(line_no, line)| {
            let malformed = || SimError::MalformedTable {
                table: "program catalog",
                line_no,
                line: line.to_string(),
            };
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let (name, size, path) = match fields.as_slice() {
                [name, size] => (*name, *size, None),
                [name, size, path] => (*name, *size, Some(PathBuf::from(path))),
                _ => return Err(malformed()),
            };
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(malformed());
            }
            let size = size.parse::<u32>().map_err(|_| malformed())?;
            Ok(ExternalProgram {
                name: name.to_string(),
                size,
                trace_path: path,
            })
        })
        .collect()
}

/// Reads a program catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<ProgramCatalog, SimError> {
    parse_catalog(&read(path.as_ref())?)
}

/// Loads external program traces from disk.
///
/// Relative trace paths, and the default `<name>.txt`, resolve against
/// `program_dir`.
#[derive(Debug, Clone)]
pub struct FsTraceSource {
    program_dir: PathBuf,
}

impl FsTraceSource {
    /// Creates a source resolving programs against `program_dir`.
    pub fn new(program_dir: impl Into<PathBuf>) -> Self {
        Self {
            program_dir: program_dir.into(),
        }
    }

    /// Directory programs are resolved against.
    pub fn program_dir(&self) -> &Path {
        &self.program_dir
    }
}

impl TraceSource for FsTraceSource {
    fn load(&self, program: &ExternalProgram) -> Result<Vec<TraceEvent>, SimError> {
        load_trace(program.resolve_trace_path(&self.program_dir))
    }
}
