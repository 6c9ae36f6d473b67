//! Processes scheduled by the queues

/// CPU and I/O bursts
pub mod burst;
/// Burst-list driven process
pub mod sim;
/// Process storage owned by the scheduler
pub mod table;

pub use burst::Burst;
pub use sim::SimProcess;
pub use table::ProcessTable;

use crate::queue::{InterruptKind, QueueId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PROCESS_ID: AtomicU64 = AtomicU64::new(1);

/// Unique process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(u64);

impl ProcessId {
    /// Allocate a fresh process id
    pub fn new() -> Self {
        Self(NEXT_PROCESS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw id
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Default for ProcessId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Scheduling state of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created, not yet run
    New,
    /// Waiting for the CPU
    Ready,
    /// Ran on the CPU during the last tick
    Running,
    /// Waiting on I/O
    Blocked,
    /// All bursts done
    Terminated,
}

/// What a queue needs from the processes it holds.
///
/// A queue only ever touches its head process, and only through this
/// contract: it records itself as the parent queue on enqueue, runs one
/// burst step per tick, and reads the state-changed flag afterwards.
pub trait Process: fmt::Debug {
    /// Get process id
    fn id(&self) -> ProcessId;

    /// Get process name
    fn name(&self) -> &str;

    /// Tick at which the process enters the system
    fn arrival_time(&self) -> u64;

    /// Get current scheduling state
    fn state(&self) -> ProcessState;

    /// True when the last execution step changed the scheduling state
    fn state_changed(&self) -> bool;

    /// Queue that last enqueued the process
    fn parent_queue(&self) -> Option<QueueId>;

    /// Record the queue now holding the process
    fn set_parent_queue(&mut self, queue: QueueId);

    /// Run the current CPU burst for `elapsed` time units.
    ///
    /// Returns the interrupt the process raises when its status changed,
    /// if any.
    fn execute_cpu_burst(&mut self, elapsed: u64) -> Option<InterruptKind>;

    /// Run the current blocking burst for `elapsed` time units
    fn execute_blocking_burst(&mut self, elapsed: u64) -> Option<InterruptKind>;

    /// Total CPU time consumed so far
    fn cpu_time(&self) -> u64;

    /// Total blocking time consumed so far
    fn io_time(&self) -> u64;
}
