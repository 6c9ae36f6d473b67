//! Per-level process queues and the interrupt protocol they speak

/// Interrupt values and handlers
pub mod interrupt;
/// The priority-level queue
pub mod level;

pub use interrupt::{Interrupt, InterruptHandler, InterruptKind, InterruptMailbox};
pub use level::Queue;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a queue inside its scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueueId(usize);

impl QueueId {
    /// Create a queue id from its index in the scheduler
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Kind of work a queue hands to its head process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueType {
    /// Ready queue; the head runs CPU bursts
    Cpu,
    /// I/O queue; the head runs blocking bursts
    Blocking,
}

impl fmt::Display for QueueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueType::Cpu => write!(f, "cpu"),
            QueueType::Blocking => write!(f, "blocking"),
        }
    }
}
