use super::{Interrupt, InterruptHandler, InterruptKind, QueueId, QueueType};
use crate::error::{Result, SchedulerError};
use crate::process::{Process, ProcessId, ProcessTable};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// One priority level of a multi-level feedback queue.
///
/// Holds process ids in arrival order and charges the head for every
/// tick of work it is given. Once the head has held the level for a full
/// quantum it is removed and the scheduler is told to move it down.
#[derive(Debug, Clone)]
pub struct Queue {
    id: QueueId,
    priority_level: u32,
    quantum: u64,
    quantum_clock: u64,
    queue_type: QueueType,
    processes: VecDeque<ProcessId>,
}

impl Queue {
    /// Create an empty queue. Lower `priority_level` is scheduled first.
    pub fn new(id: QueueId, priority_level: u32, quantum: u64, queue_type: QueueType) -> Result<Self> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(id));
        }

        Ok(Self {
            id,
            priority_level,
            quantum,
            quantum_clock: 0,
            queue_type,
            processes: VecDeque::new(),
        })
    }

    /// Get queue id
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Get priority level (0 is scheduled first)
    pub fn priority_level(&self) -> u32 {
        self.priority_level
    }

    /// Get queue type
    pub fn queue_type(&self) -> QueueType {
        self.queue_type
    }

    /// Time a head may hold this level before it is moved down
    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    /// Time granted to the current head since the last reset
    pub fn quantum_clock(&self) -> u64 {
        self.quantum_clock
    }

    /// Number of queued processes
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Check if no process is queued
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Check if a process is queued here
    pub fn contains(&self, process: ProcessId) -> bool {
        self.processes.contains(&process)
    }

    /// Ids in scheduling order
    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.processes.iter().copied()
    }

    /// Append a process at the tail and make this queue its parent
    pub fn enqueue(&mut self, process: &mut dyn Process) -> ProcessId {
        let id = process.id();
        process.set_parent_queue(self.id);

        if self.contains(id) {
            warn!("[{}] {} is already queued", self.id, id);
            return id;
        }

        self.processes.push_back(id);
        trace!("[{}] enqueued {} ({} waiting)", self.id, id, self.processes.len());
        id
    }

    /// Remove the head; `None` when the queue is empty
    pub fn dequeue(&mut self) -> Option<ProcessId> {
        self.processes.pop_front()
    }

    /// Look at the head; `None` when the queue is empty
    pub fn peek(&self) -> Option<ProcessId> {
        self.processes.front().copied()
    }

    /// Take a process out from anywhere in the queue.
    ///
    /// Returns false when it was not queued here. Removing the head resets
    /// the quantum clock, since the clock belongs to the head.
    pub fn remove(&mut self, process: ProcessId) -> bool {
        let Some(pos) = self.processes.iter().position(|&id| id == process) else {
            return false;
        };

        self.processes.remove(pos);
        if pos == 0 {
            self.quantum_clock = 0;
        }
        trace!("[{}] removed {}", self.id, process);
        true
    }

    /// Remove every process and reset the quantum clock
    pub fn drain(&mut self) -> Vec<ProcessId> {
        self.quantum_clock = 0;
        self.processes.drain(..).collect()
    }

    /// Give the head `elapsed` units of CPU time.
    ///
    /// Fails with [`SchedulerError::EmptyQueue`] without touching anything
    /// when there is no head to run.
    pub fn do_cpu_work(
        &mut self,
        elapsed: u64,
        table: &mut ProcessTable,
        handler: &mut dyn InterruptHandler,
    ) -> Result<()> {
        self.do_work(elapsed, table, handler, |process, elapsed| {
            process.execute_cpu_burst(elapsed)
        })
    }

    /// Give the head `elapsed` units of blocking (I/O) time
    pub fn do_blocking_work(
        &mut self,
        elapsed: u64,
        table: &mut ProcessTable,
        handler: &mut dyn InterruptHandler,
    ) -> Result<()> {
        self.do_work(elapsed, table, handler, |process, elapsed| {
            process.execute_blocking_burst(elapsed)
        })
    }

    fn do_work<F>(
        &mut self,
        elapsed: u64,
        table: &mut ProcessTable,
        handler: &mut dyn InterruptHandler,
        execute: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut dyn Process, u64) -> Option<InterruptKind>,
    {
        let head = self.peek().ok_or(SchedulerError::EmptyQueue(self.id))?;
        let process = table
            .get_mut(head)
            .ok_or(SchedulerError::ProcessNotFound(head))?;

        if let Some(kind) = execute(&mut *process, elapsed) {
            self.emit_interrupt(head, kind, handler);
        }
        self.manage_time_slice(&*process, elapsed, handler);
        Ok(())
    }

    /// Charge `elapsed` to `current`, which must be the head.
    ///
    /// A process whose state changed this tick is no longer this queue's
    /// concern, so the clock is reset and nothing else happens. Otherwise
    /// the clock advances, and reaching the quantum removes the head and
    /// raises [`InterruptKind::LowerPriority`].
    pub fn manage_time_slice(
        &mut self,
        current: &dyn Process,
        elapsed: u64,
        handler: &mut dyn InterruptHandler,
    ) {
        if current.state_changed() {
            self.quantum_clock = 0;
            return;
        }

        self.quantum_clock = self.quantum_clock.saturating_add(elapsed);

        if self.quantum_clock >= self.quantum {
            self.quantum_clock = 0;

            if let Some(expired) = self.dequeue() {
                debug!("[{}] quantum of {} expired for {}", self.id, self.quantum, expired);
                handler.handle_interrupt(Interrupt::new(
                    self.id,
                    expired,
                    InterruptKind::LowerPriority,
                ));
            }
        }
        // Below the quantum the head simply keeps the level.
    }

    /// Remove `source` from wherever it sits and forward blocked/ready
    /// transitions to the scheduler.
    ///
    /// The forward happens even when `source` was not queued here; other
    /// kinds are dropped after the removal.
    pub fn emit_interrupt(
        &mut self,
        source: ProcessId,
        kind: InterruptKind,
        handler: &mut dyn InterruptHandler,
    ) {
        if let Some(pos) = self.processes.iter().position(|&id| id == source) {
            self.processes.remove(pos);
        }

        match kind {
            InterruptKind::ProcessBlocked | InterruptKind::ProcessReady => {
                debug!("[{}] {} raised {}", self.id, source, kind);
                handler.handle_interrupt(Interrupt::new(self.id, source, kind));
            }
            InterruptKind::LowerPriority => {
                trace!("[{}] ignoring {} from {}", self.id, kind, source);
            }
        }
    }
}
