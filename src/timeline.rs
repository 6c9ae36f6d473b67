//! Ordered log of scheduling events

use crate::process::ProcessId;
use crate::queue::{InterruptKind, QueueId};
use serde::{Deserialize, Serialize};

/// What happened to a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Entered its first queue
    Admitted,
    /// Ran on the CPU for a tick
    Dispatched,
    /// Was relocated by an interrupt
    Interrupt(InterruptKind),
    /// Finished its last burst
    Completed,
    /// Moved to the top level by a priority boost
    Boosted,
}

/// One timeline entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub tick: u64,
    pub queue: QueueId,
    pub process: ProcessId,
    pub kind: EventKind,
}

/// Timeline recorder
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    enabled: bool,
    events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Create a new timeline
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    /// Append an event
    pub fn record(&mut self, tick: u64, queue: QueueId, process: ProcessId, kind: EventKind) {
        if self.enabled {
            self.events.push(TimelineEvent {
                tick,
                queue,
                process,
                kind,
            });
        }
    }

    /// Check if recording is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Events concerning one process
    pub fn for_process(&self, process: ProcessId) -> impl Iterator<Item = &TimelineEvent> {
        self.events.iter().filter(move |e| e.process == process)
    }
}
