use crate::process::ProcessId;
use std::collections::HashMap;

/// Destination rules for relocated processes.
///
/// Remembers the CPU level each process belongs to while it sits in the
/// I/O queue, so a process that yields before its quantum runs out keeps
/// its priority.
#[derive(Debug, Clone)]
pub struct Placement {
    levels: usize,
    promote_on_ready: bool,
    home: HashMap<ProcessId, usize>,
}

impl Placement {
    /// Create placement rules for `levels` CPU levels
    pub fn new(levels: usize, promote_on_ready: bool) -> Self {
        Self {
            levels: levels.max(1),
            promote_on_ready,
            home: HashMap::new(),
        }
    }

    /// Level the process returns to; new processes start at the top
    pub fn home_level(&self, process: ProcessId) -> usize {
        self.home.get(&process).copied().unwrap_or(0)
    }

    /// Next level down from `from`; the bottom level keeps its processes
    pub fn lower(&mut self, process: ProcessId, from: usize) -> usize {
        let next = (from + 1).min(self.levels - 1);
        self.home.insert(process, next);
        next
    }

    /// Remember `from` as the level to return to after I/O
    pub fn block(&mut self, process: ProcessId, from: usize) {
        if from < self.levels {
            self.home.insert(process, from);
        }
    }

    /// Level for a process whose I/O completed
    pub fn ready(&mut self, process: ProcessId) -> usize {
        let home = self.home_level(process);
        let level = if self.promote_on_ready {
            home.saturating_sub(1)
        } else {
            home
        };
        self.home.insert(process, level);
        level
    }

    /// Send everyone back to the top level
    pub fn boost_all(&mut self) {
        self.home.values_mut().for_each(|level| *level = 0);
    }

    pub fn forget(&mut self, process: ProcessId) {
        self.home.remove(&process);
    }
}
