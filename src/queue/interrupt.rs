use super::QueueId;
use crate::process::ProcessId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Reason a queue asks its scheduler to relocate a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterruptKind {
    /// The process used up this level's quantum
    LowerPriority,
    /// The process finished a CPU burst and is waiting on I/O
    ProcessBlocked,
    /// The process finished a blocking burst and wants the CPU again
    ProcessReady,
}

impl fmt::Display for InterruptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterruptKind::LowerPriority => "LOWER_PRIORITY",
            InterruptKind::ProcessBlocked => "PROCESS_BLOCKED",
            InterruptKind::ProcessReady => "PROCESS_READY",
        };
        f.write_str(name)
    }
}

/// Interrupt message sent from a queue to its scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interrupt {
    /// Queue that raised the interrupt
    pub queue: QueueId,
    /// Process to relocate
    pub process: ProcessId,
    /// Why it has to move
    pub kind: InterruptKind,
}

impl Interrupt {
    /// Create a new interrupt
    pub fn new(queue: QueueId, process: ProcessId, kind: InterruptKind) -> Self {
        Self {
            queue,
            process,
            kind,
        }
    }
}

/// Receiver of queue interrupts.
///
/// Delivery is fire-and-forget: a queue never learns what the handler did
/// with the message.
pub trait InterruptHandler {
    /// Accept an interrupt
    fn handle_interrupt(&mut self, interrupt: Interrupt);
}

/// FIFO buffer of interrupts, drained by the scheduler after each work call
#[derive(Debug, Default)]
pub struct InterruptMailbox {
    pending: VecDeque<Interrupt>,
}

impl InterruptMailbox {
    /// Create an empty mailbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of undelivered interrupts
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if no interrupts are waiting
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Look at the waiting interrupts without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &Interrupt> {
        self.pending.iter()
    }

    /// Take every waiting interrupt in arrival order
    pub fn drain(&mut self) -> Vec<Interrupt> {
        self.pending.drain(..).collect()
    }
}

impl InterruptHandler for InterruptMailbox {
    fn handle_interrupt(&mut self, interrupt: Interrupt) {
        self.pending.push_back(interrupt);
    }
}
