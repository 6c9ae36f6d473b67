use serde::{Deserialize, Serialize};

/// One unit of work in a process's life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Burst {
    /// Needs the CPU for this many time units
    Cpu(u64),
    /// Waits on I/O for this many time units
    Io(u64),
}

impl Burst {
    /// Remaining length
    pub fn length(&self) -> u64 {
        match self {
            Burst::Cpu(len) | Burst::Io(len) => *len,
        }
    }

    /// Check if this is a CPU burst
    pub fn is_cpu(&self) -> bool {
        matches!(self, Burst::Cpu(_))
    }

    /// Check if this is a blocking burst
    pub fn is_io(&self) -> bool {
        matches!(self, Burst::Io(_))
    }
}
