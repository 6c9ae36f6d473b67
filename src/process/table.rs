use super::{Process, ProcessId};
use std::collections::BTreeMap;

/// Owner of every process known to a scheduler.
///
/// Queues hold ids only; work methods borrow the table to reach the head.
#[derive(Debug, Default)]
pub struct ProcessTable {
    processes: BTreeMap<ProcessId, Box<dyn Process>>,
}

impl ProcessTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a process, returning the one it replaced
    pub fn insert(&mut self, process: Box<dyn Process>) -> Option<Box<dyn Process>> {
        self.processes.insert(process.id(), process)
    }

    /// Look a process up by id
    pub fn get(&self, id: ProcessId) -> Option<&(dyn Process + 'static)> {
        self.processes.get(&id).map(|p| &**p)
    }

    /// Look a process up by id for execution
    pub fn get_mut(&mut self, id: ProcessId) -> Option<&mut (dyn Process + 'static)> {
        self.processes.get_mut(&id).map(|p| &mut **p)
    }

    /// Take a process out of the table
    pub fn remove(&mut self, id: ProcessId) -> Option<Box<dyn Process>> {
        self.processes.remove(&id)
    }

    /// Check if a process is stored
    pub fn contains(&self, id: ProcessId) -> bool {
        self.processes.contains_key(&id)
    }

    /// Number of stored processes
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Iterate in id order
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Process + 'static)> {
        self.processes.values().map(|p| &**p)
    }
}
