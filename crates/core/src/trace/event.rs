//! Decoded trace events.

use std::fmt;

/// What a trace line asks the simulated CPU to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    /// User-mode computation for `parameter` time units.
    Cpu,
    /// System call serviced by the ISR of device `parameter`.
    Syscall,
    /// I/O completion interrupt from device `parameter`.
    EndIo,
    /// Duplicate the running process; `parameter` is the PCB clone time.
    Fork,
    /// Replace the running image with program `name`; `parameter` is the size lookup time.
    Exec,
    /// Start of the parent's branch after a FORK.
    IfParent,
    /// Start of the child's branch after a FORK.
    IfChild,
    /// End of the FORK branches.
    EndIf,
}

impl Activity {
    /// Every activity, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Cpu,
        Self::Syscall,
        Self::EndIo,
        Self::Fork,
        Self::Exec,
        Self::IfParent,
        Self::IfChild,
        Self::EndIf,
    ];

    /// Looks up the activity spelled `keyword` in a trace file.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.keyword() == keyword)
    }

    /// The spelling used in trace files.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Syscall => "SYSCALL",
            Self::EndIo => "END_IO",
            Self::Fork => "FORK",
            Self::Exec => "EXEC",
            Self::IfParent => "IF_PARENT",
            Self::IfChild => "IF_CHILD",
            Self::EndIf => "ENDIF",
        }
    }

    /// Markers only delimit fork branches; they are never executed as work.
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::IfParent | Self::IfChild | Self::EndIf)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One decoded trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// What to do.
    pub activity: Activity,
    /// Duration, device number, or clone/lookup time depending on `activity`. Defaults to 0.
    pub parameter: u64,
    /// Operand program name; empty when the line has none.
    pub name: String,
}

impl TraceEvent {
    /// Creates an event without an operand.
    pub const fn new(activity: Activity, parameter: u64) -> Self {
        Self {
            activity,
            parameter,
            name: String::new(),
        }
    }

    /// Sets the operand program name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for TraceEvent {
    /// Formats the event the way trace files write it, e.g. `CPU, 50` or `EXEC program1, 50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}, {}", self.activity, self.parameter)
        } else {
            write!(f, "{} {}, {}", self.activity, self.name, self.parameter)
        }
    }
}
