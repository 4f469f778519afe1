//! External program catalog.
//!
//! Maps the program names EXEC refers to onto their footprint and trace file.

use std::fmt;
use std::path::{Path, PathBuf};

/// One program an EXEC can load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProgram {
    /// Name used in `EXEC <name>` lines.
    pub name: String,
    /// Footprint in capacity units.
    pub size: u32,
    /// Explicit trace file; `None` means `<name>.txt` in the program directory.
    pub trace_path: Option<PathBuf>,
}

impl ExternalProgram {
    /// Creates a catalog entry with the default trace location.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
            trace_path: None,
        }
    }

    /// Where this program's trace lives, given the directory programs are resolved against.
    pub fn resolve_trace_path(&self, program_dir: &Path) -> PathBuf {
        match &self.trace_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => program_dir.join(path),
            None => program_dir.join(format!("{}.txt", self.name)),
        }
    }
}

/// The set of programs available to EXEC, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramCatalog {
    programs: Vec<ExternalProgram>,
}

impl ProgramCatalog {
    /// Creates an empty catalog.
    pub const fn new() -> Self {
        Self {
            programs: Vec::new(),
        }
    }

    /// Adds a program. A later entry with the same name is shadowed by the earlier one.
    pub fn insert(&mut self, program: ExternalProgram) {
        self.programs.push(program);
    }

    /// Looks a program up by name.
    pub fn get(&self, name: &str) -> Option<&ExternalProgram> {
        self.programs.iter().find(|p| p.name == name)
    }

    /// Catalog entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExternalProgram> {
        self.programs.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl FromIterator<ExternalProgram> for ProgramCatalog {
    fn from_iter<I: IntoIterator<Item = ExternalProgram>>(iter: I) -> Self {
        Self {
            programs: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ProgramCatalog {
    /// Lists the catalog as a two-column table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+---------------------+--------+")?;
        writeln!(f, "| program             |   size |")?;
        writeln!(f, "+---------------------+--------+")?;
        for program in &self.programs {
            writeln!(f, "| {:<19} | {:>6} |", program.name, program.size)?;
        }
        write!(f, "+---------------------+--------+")
    }
}

/// Footprint of `name`, or 0 when the catalog does not know it.
pub fn get_program_size(name: &str, catalog: &ProgramCatalog) -> u32 {
    catalog.get(name).map_or(0, |p| p.size)
}
