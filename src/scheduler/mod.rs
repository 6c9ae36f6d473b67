//! Reference multi-level feedback queue scheduler

/// Scheduler engine
pub mod engine;
/// Relocation rules
pub mod placement;

pub use engine::{MlfqScheduler, ProcessRecord, LIFECYCLE_METRICS, QUEUE_METRICS};
pub use placement::Placement;
