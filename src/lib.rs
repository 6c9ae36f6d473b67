//! One priority level of a multi-level feedback queue scheduler, the
//! interrupt protocol that ties levels together, and a tick-driven
//! reference scheduler built on top of it.

#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod process;
pub mod queue;
pub mod scheduler;
pub mod simulation;
pub mod timeline;

/// Prelude for convenient imports
pub mod prelude;

// Re-exports
pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use queue::Queue;
pub use scheduler::MlfqScheduler;
pub use simulation::Simulation;
