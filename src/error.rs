use crate::process::ProcessId;
use crate::queue::QueueId;
use thiserror::Error;

/// Scheduler errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Queue is empty: {0}")]
    EmptyQueue(QueueId),

    #[error("Queue not found: {0}")]
    QueueNotFound(QueueId),

    #[error("Process not found: {0}")]
    ProcessNotFound(ProcessId),

    #[error("Process already admitted: {0}")]
    DuplicateProcess(ProcessId),

    #[error("Process has not arrived yet: {0}")]
    NotArrived(ProcessId),

    #[error("Quantum must be positive for queue {0}")]
    InvalidQuantum(QueueId),

    #[error("Invalid process: {0}")]
    InvalidProcess(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Simulation did not finish within {0} ticks")]
    TickLimitExceeded(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SchedulerError>;
