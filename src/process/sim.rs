use super::{Burst, Process, ProcessId, ProcessState};
use crate::error::{Result, SchedulerError};
use crate::queue::{InterruptKind, QueueId};
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Process driven by a fixed list of alternating CPU and I/O bursts
#[derive(Debug, Clone)]
pub struct SimProcess {
    id: ProcessId,
    name: String,
    arrival: u64,
    bursts: VecDeque<Burst>,
    state: ProcessState,
    state_changed: bool,
    parent_queue: Option<QueueId>,
    cpu_time: u64,
    io_time: u64,
}

impl SimProcess {
    /// Create a process arriving at tick 0
    pub fn new(name: impl Into<String>, bursts: Vec<Burst>) -> Result<Self> {
        Self::with_arrival(name, 0, bursts)
    }

    /// Create a process arriving at `arrival`.
    ///
    /// Bursts must start with CPU work, alternate between CPU and I/O and
    /// all be longer than zero.
    pub fn with_arrival(name: impl Into<String>, arrival: u64, bursts: Vec<Burst>) -> Result<Self> {
        let name = name.into();
        validate_bursts(&name, &bursts)?;

        Ok(Self {
            id: ProcessId::new(),
            name,
            arrival,
            bursts: bursts.into(),
            state: ProcessState::New,
            state_changed: false,
            parent_queue: None,
            cpu_time: 0,
            io_time: 0,
        })
    }

    /// Single CPU burst of `length`
    pub fn cpu_bound(name: impl Into<String>, length: u64) -> Result<Self> {
        Self::new(name, vec![Burst::Cpu(length)])
    }

    /// Bursts not yet finished, current one first
    pub fn remaining_bursts(&self) -> impl Iterator<Item = &Burst> {
        self.bursts.iter()
    }

    /// Move past the finished front burst and report the resulting transition
    fn finish_burst(&mut self) -> Option<InterruptKind> {
        self.bursts.pop_front();
        self.state_changed = true;

        match self.bursts.front() {
            None => {
                self.state = ProcessState::Terminated;
                trace!("[{}] '{}' terminated", self.id, self.name);
                None
            }
            Some(Burst::Io(_)) => {
                self.state = ProcessState::Blocked;
                Some(InterruptKind::ProcessBlocked)
            }
            Some(Burst::Cpu(_)) => {
                self.state = ProcessState::Ready;
                Some(InterruptKind::ProcessReady)
            }
        }
    }
}

fn validate_bursts(name: &str, bursts: &[Burst]) -> Result<()> {
    match bursts.first() {
        None => {
            return Err(SchedulerError::InvalidProcess(format!("'{}' has no bursts", name)));
        }
        Some(Burst::Io(_)) => {
            return Err(SchedulerError::InvalidProcess(format!(
                "'{}' must start with a CPU burst",
                name
            )));
        }
        Some(Burst::Cpu(_)) => {}
    }

    if let Some(pos) = bursts.iter().position(|b| b.length() == 0) {
        return Err(SchedulerError::InvalidProcess(format!(
            "'{}' has an empty burst at position {}",
            name, pos
        )));
    }

    if let Some(pos) = bursts.windows(2).position(|w| w[0].is_cpu() == w[1].is_cpu()) {
        return Err(SchedulerError::InvalidProcess(format!(
            "'{}' has two consecutive bursts of the same kind at position {}",
            name,
            pos + 1
        )));
    }

    Ok(())
}

impl Process for SimProcess {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn arrival_time(&self) -> u64 {
        self.arrival
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn state_changed(&self) -> bool {
        self.state_changed
    }

    fn parent_queue(&self) -> Option<QueueId> {
        self.parent_queue
    }

    fn set_parent_queue(&mut self, queue: QueueId) {
        self.parent_queue = Some(queue);
        if self.state == ProcessState::New {
            self.state = ProcessState::Ready;
        }
    }

    fn execute_cpu_burst(&mut self, elapsed: u64) -> Option<InterruptKind> {
        self.state_changed = false;

        let remaining = match self.bursts.front_mut() {
            Some(Burst::Cpu(remaining)) => remaining,
            other => {
                warn!("[{}] CPU work requested during {:?}", self.id, other);
                return None;
            }
        };

        let used = elapsed.min(*remaining);
        *remaining -= used;
        self.cpu_time += used;
        self.state = ProcessState::Running;

        if *remaining == 0 {
            self.finish_burst()
        } else {
            None
        }
    }

    fn execute_blocking_burst(&mut self, elapsed: u64) -> Option<InterruptKind> {
        self.state_changed = false;

        let remaining = match self.bursts.front_mut() {
            Some(Burst::Io(remaining)) => remaining,
            other => {
                warn!("[{}] blocking work requested during {:?}", self.id, other);
                return None;
            }
        };

        let used = elapsed.min(*remaining);
        *remaining -= used;
        self.io_time += used;

        if *remaining == 0 {
            self.finish_burst()
        } else {
            None
        }
    }

    fn cpu_time(&self) -> u64 {
        self.cpu_time
    }

    fn io_time(&self) -> u64 {
        self.io_time
    }
}
