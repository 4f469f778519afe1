//! The recursive trace interpreter.
//!
//! One call to [`Simulator::simulate`] is one process's lifetime on the CPU.
//! FORK runs the child to completion in a nested call before the parent goes
//! on; EXEC runs the new image in a nested call and never returns to the old
//! trace. The partition table lives in the simulator and is threaded through
//! every level by `&mut self`.

use tracing::{debug, error, info, warn};

use crate::common::{SimError, Time, advance};
use crate::config::Config;
use crate::interrupt::{self, DeviceTable, VectorTable};
use crate::log::{ProcessState, SimLog, SnapshotRow, StatusSnapshot};
use crate::memory::PartitionTable;
use crate::process::{
    ExternalProgram, Pcb, ProgramCatalog, WaitQueue, get_program_size, next_pid,
};
use crate::sim::fork::split_fork;
use crate::sim::source::TraceSource;
use crate::stats::SimStats;
use crate::trace::{Activity, TraceEvent};

/// What one process's trace produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Steps, errors, and snapshots in the order they happened.
    pub log: SimLog,
    /// Clock value when the trace finished.
    pub end_time: Time,
}

/// Trace interpreter plus the state shared by every recursion level.
#[derive(Debug)]
pub struct Simulator<'a> {
    config: &'a Config,
    vectors: &'a VectorTable,
    devices: &'a DeviceTable,
    catalog: &'a ProgramCatalog,
    source: &'a dyn TraceSource,
    memory: PartitionTable,
    stats: SimStats,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator with an empty partition table laid out by `config`.
    pub fn new(
        config: &'a Config,
        vectors: &'a VectorTable,
        devices: &'a DeviceTable,
        catalog: &'a ProgramCatalog,
        source: &'a dyn TraceSource,
    ) -> Self {
        Self {
            config,
            vectors,
            devices,
            catalog,
            source,
            memory: PartitionTable::from_config(&config.memory),
            stats: SimStats::default(),
        }
    }

    /// Replaces the partition table, e.g. to start from a partly occupied layout.
    #[must_use]
    pub fn with_memory(mut self, memory: PartitionTable) -> Self {
        self.memory = memory;
        self
    }

    /// Current partition table.
    pub const fn memory(&self) -> &PartitionTable {
        &self.memory
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Creates the bootstrap process and places it in memory.
    ///
    /// Failure to place it is reported but not fatal: the returned PCB then
    /// has no partition and the run goes on without one.
    pub fn bootstrap_process(&mut self) -> Pcb {
        let boot = &self.config.bootstrap;
        let mut pcb = Pcb::new(0, None, boot.program_name.clone(), boot.size);
        match self.memory.allocate_memory(&mut pcb) {
            Some(partition) => info!(pid = pcb.pid, partition, "bootstrap process placed"),
            None => error!(
                pid = pcb.pid,
                size = pcb.size,
                "memory allocation failed for the bootstrap process"
            ),
        }
        pcb
    }

    /// Interprets `trace` as the lifetime of `current`.
    ///
    /// # Arguments
    ///
    /// * `trace` - Decoded lines of the process's trace.
    /// * `start_time` - Clock value when the process gets the CPU.
    /// * `current` - The process being simulated.
    /// * `wait_queue` - Every other known process, all waiting.
    ///
    /// # Returns
    ///
    /// The log and end time of `current` and everything it forked or exec'd.
    pub fn simulate(
        &mut self,
        trace: &[TraceEvent],
        start_time: Time,
        current: &Pcb,
        wait_queue: &WaitQueue,
    ) -> Result<Outcome, SimError> {
        let outcome = self.run(trace, start_time, current, wait_queue, 0)?;
        self.stats.end_time = outcome.end_time;
        Ok(outcome)
    }

    fn run(
        &mut self,
        trace: &[TraceEvent],
        start_time: Time,
        current: &Pcb,
        wait_queue: &WaitQueue,
        depth: usize,
    ) -> Result<Outcome, SimError> {
        self.stats.enter(depth);
        let mut log = SimLog::new();
        let mut time = start_time;
        let mut i = 0;

        while i < trace.len() {
            let event = &trace[i];
            if event.activity.is_marker() {
                i += 1;
                continue;
            }
            debug!(time, pid = current.pid, depth, event = %event, "interpreting");

            match event.activity {
                Activity::Cpu => {
                    let after = advance(time, event.parameter)?;
                    log.step(time, event.parameter, "CPU Burst");
                    time = after;
                    self.stats.cpu_bursts += 1;
                    self.stats.time_user += event.parameter;
                }
                Activity::Syscall => {
                    self.stats.syscalls += 1;
                    time = self.service_interrupt(&mut log, time, event, "SYSCALL ISR")?;
                }
                Activity::EndIo => {
                    self.stats.io_completions += 1;
                    time = self.service_interrupt(&mut log, time, event, "ENDIO ISR")?;
                }
                Activity::Fork => {
                    let (after, resume) =
                        self.fork(&mut log, time, trace, i, current, wait_queue, depth)?;
                    time = after;
                    i = resume;
                    continue;
                }
                Activity::Exec => {
                    time = self.exec(&mut log, time, event, current, wait_queue, depth)?;
                    // The old image is gone whether or not the exec succeeded.
                    break;
                }
                Activity::IfParent | Activity::IfChild | Activity::EndIf => {}
            }
            i += 1;
        }

        Ok(Outcome {
            log,
            end_time: time,
        })
    }

    /// Logs and charges one kernel step.
    fn charge(
        &mut self,
        log: &mut SimLog,
        time: Time,
        duration: u64,
        description: impl Into<String>,
    ) -> Result<Time, SimError> {
        let after = advance(time, duration)?;
        log.step(time, duration, description);
        self.stats.time_kernel += duration;
        Ok(after)
    }

    /// Kernel entry boilerplate for `vector`.
    fn enter_kernel(
        &mut self,
        log: &mut SimLog,
        time: Time,
        vector: usize,
    ) -> Result<Time, SimError> {
        let (boilerplate, after) = interrupt::dispatch(
            time,
            self.config.timing.context_save_time,
            vector,
            self.vectors,
            self.config,
        )?;
        log.append(boilerplate);
        self.stats.time_kernel += after - time;
        Ok(after)
    }

    /// SYSCALL and END_IO: boilerplate, the device's ISR, then IRET.
    fn service_interrupt(
        &mut self,
        log: &mut SimLog,
        time: Time,
        event: &TraceEvent,
        isr: &str,
    ) -> Result<Time, SimError> {
        let device = usize::try_from(event.parameter).unwrap_or(usize::MAX);
        let delay = self.devices.delay(device)?;
        let time = self.enter_kernel(log, time, device)?;
        let time = self.charge(log, time, delay, isr)?;
        self.charge(log, time, self.config.timing.iret, "IRET")
    }

    /// FORK on line `at`. Returns the clock and the index the parent resumes at.
    #[allow(clippy::too_many_arguments)]
    fn fork(
        &mut self,
        log: &mut SimLog,
        time: Time,
        trace: &[TraceEvent],
        at: usize,
        current: &Pcb,
        wait_queue: &WaitQueue,
        depth: usize,
    ) -> Result<(Time, usize), SimError> {
        let event = &trace[at];
        self.stats.forks += 1;
        let mut time = self.enter_kernel(log, time, self.config.timing.fork_vector)?;

        let child_pid = next_pid(wait_queue, current);
        let child = match self
            .memory
            .find_available_partition(current.size, wait_queue)
        {
            None => {
                warn!(time, parent = current.pid, size = current.size, "fork: no partition");
                log.error(time, "FORK ERROR: No available partition");
                self.stats.fork_failures += 1;
                None
            }
            Some(partition) => {
                let child = current.fork_child(child_pid, partition);
                time = self.charge(log, time, event.parameter, "cloning the PCB")?;
                self.memory.occupy(partition, &child.program_name);
                time = self.charge(log, time, self.config.timing.scheduler, "scheduler called")?;
                time = self.charge(log, time, self.config.timing.iret, "IRET")?;

                let mut rows = vec![
                    row(&child, ProcessState::Running),
                    row(current, ProcessState::Waiting),
                ];
                rows.extend(wait_queue.iter().map(|p| row(p, ProcessState::Waiting)));
                log.snapshot(StatusSnapshot {
                    time,
                    event: event.clone(),
                    rows,
                });
                Some(child)
            }
        };

        let split = split_fork(trace, at);

        if let Some(child) = child {
            info!(
                time,
                parent = current.pid,
                child = child.pid,
                partition = child.partition,
                lines = split.child.len(),
                "forked"
            );
            self.stats.processes_created += 1;
            let child_queue = wait_queue.with(current.clone());
            let outcome = self.run(&split.child, time, &child, &child_queue, depth + 1)?;
            log.append(outcome.log);
            time = outcome.end_time;
            if let Some(partition) = child.partition {
                self.memory.free(partition);
            }
        }

        Ok((time, split.resume))
    }

    /// EXEC: replace the image of `current` and run the new program's trace.
    fn exec(
        &mut self,
        log: &mut SimLog,
        time: Time,
        event: &TraceEvent,
        current: &Pcb,
        wait_queue: &WaitQueue,
        depth: usize,
    ) -> Result<Time, SimError> {
        self.stats.execs += 1;
        let config = self.config;
        let timing = &config.timing;
        let mut time = self.enter_kernel(log, time, timing.exec_vector)?;

        let size = get_program_size(&event.name, self.catalog);
        if size == 0 {
            warn!(time, pid = current.pid, program = %event.name, "exec: program not found");
            log.error(time, "EXEC ERROR: Program not found");
            self.stats.exec_unknown_program += 1;
            return Ok(time);
        }

        let Some(partition) = self.memory.find_available_partition(size, wait_queue) else {
            warn!(time, pid = current.pid, program = %event.name, size, "exec: no partition");
            log.error(time, "EXEC ERROR: No available partition");
            self.stats.exec_failures += 1;
            return Ok(time);
        };

        time = self.charge(
            log,
            time,
            event.parameter,
            format!("Program is {size} Mb large"),
        )?;
        time = self.charge(
            log,
            time,
            u64::from(size).saturating_mul(timing.load_per_unit),
            "loading program into memory",
        )?;
        time = self.charge(log, time, timing.mark_partition, "marking partition as occupied")?;
        time = self.charge(log, time, timing.update_pcb, "updating PCB")?;

        if let Some(old) = current.partition {
            self.memory.free(old);
        }
        self.memory.occupy(partition, &event.name);

        time = self.charge(log, time, timing.scheduler, "scheduler called")?;
        time = self.charge(log, time, timing.iret, "IRET")?;

        let image = current.exec_image(event.name.clone(), size, partition);
        let exec_queue = wait_queue.without(current.pid);

        let mut rows = vec![row(&image, ProcessState::Running)];
        rows.extend(exec_queue.iter().map(|p| row(p, ProcessState::Waiting)));
        log.snapshot(StatusSnapshot {
            time,
            event: event.clone(),
            rows,
        });

        info!(time, pid = current.pid, program = %event.name, partition, "exec");
        let catalog = self.catalog;
        let program = catalog
            .get(&event.name)
            .cloned()
            .unwrap_or_else(|| ExternalProgram::new(event.name.clone(), size));
        let program_trace = match self.source.load(&program) {
            Ok(events) => events,
            Err(err) if err.is_not_found() => {
                warn!(
                    time,
                    pid = current.pid,
                    program = %event.name,
                    error = %err,
                    "exec: trace file missing, image runs empty"
                );
                self.stats.exec_missing_trace += 1;
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let outcome = self.run(&program_trace, time, &image, &exec_queue, depth + 1)?;
        log.append(outcome.log);
        self.memory.free(partition);

        Ok(outcome.end_time)
    }
}

fn row(pcb: &Pcb, state: ProcessState) -> SnapshotRow {
    SnapshotRow {
        pcb: pcb.clone(),
        state,
    }
}
