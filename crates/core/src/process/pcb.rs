//! Process control blocks and wait queues.

/// Process identifier. The bootstrap process is pid 0.
pub type Pid = u32;

/// Identity and placement of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcb {
    /// Unique among live processes.
    pub pid: Pid,
    /// Creator's pid; `None` for the bootstrap process.
    pub ppid: Option<Pid>,
    /// Program image currently bound to the process.
    pub program_name: String,
    /// Memory footprint in capacity units.
    pub size: u32,
    /// 1-based partition number, `None` until placed.
    pub partition: Option<usize>,
}

impl Pcb {
    /// Creates an unplaced PCB.
    pub fn new(pid: Pid, ppid: Option<Pid>, program_name: impl Into<String>, size: u32) -> Self {
        Self {
            pid,
            ppid,
            program_name: program_name.into(),
            size,
            partition: None,
        }
    }

    /// Sets the partition the process occupies.
    #[must_use]
    pub const fn placed_in(mut self, partition: usize) -> Self {
        self.partition = Some(partition);
        self
    }

    /// A forked child: same image and size, new identity and partition.
    pub fn fork_child(&self, pid: Pid, partition: usize) -> Self {
        Self::new(pid, Some(self.pid), self.program_name.clone(), self.size).placed_in(partition)
    }

    /// The same process after exec: same pid and ppid, new image.
    pub fn exec_image(&self, program_name: impl Into<String>, size: u32, partition: usize) -> Self {
        Self::new(self.pid, self.ppid, program_name, size).placed_in(partition)
    }
}

/// Processes waiting relative to the process simulated at one recursion level.
///
/// Each level owns its own snapshot; children get a copy with the parent
/// appended and exec'd images get a copy without themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitQueue {
    entries: Vec<Pcb>,
}

impl WaitQueue {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Copy of this queue with `pcb` appended.
    #[must_use]
    pub fn with(&self, pcb: Pcb) -> Self {
        let mut entries = self.entries.clone();
        entries.push(pcb);
        Self { entries }
    }

    /// Copy of this queue without any entry for `pid`.
    #[must_use]
    pub fn without(&self, pid: Pid) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|p| p.pid != pid)
                .cloned()
                .collect(),
        }
    }

    /// Whether some queued process is placed in `partition`.
    pub fn holds_partition(&self, partition: usize) -> bool {
        self.entries.iter().any(|p| p.partition == Some(partition))
    }

    /// Whether `pid` is queued.
    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.iter().any(|p| p.pid == pid)
    }

    /// Queued processes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pcb> {
        self.entries.iter()
    }

    /// Number of queued processes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Pcb> for WaitQueue {
    fn from_iter<I: IntoIterator<Item = Pcb>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WaitQueue {
    type Item = &'a Pcb;
    type IntoIter = std::slice::Iter<'a, Pcb>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Next free pid: one past the largest pid among `current` and the queue.
pub fn next_pid(wait_queue: &WaitQueue, current: &Pcb) -> Pid {
    wait_queue
        .iter()
        .map(|p| p.pid)
        .fold(current.pid, Pid::max)
        + 1
}
