//! Prelude for convenient imports

// Queue
pub use crate::queue::{
    Interrupt, InterruptHandler, InterruptKind, InterruptMailbox, Queue, QueueId, QueueType,
};

// Process
pub use crate::process::{Burst, Process, ProcessId, ProcessState, ProcessTable, SimProcess};

// Scheduler
pub use crate::config::SchedulerConfig;
pub use crate::scheduler::{
    MlfqScheduler, Placement, ProcessRecord, LIFECYCLE_METRICS, QUEUE_METRICS,
};

// Simulation
pub use crate::simulation::{ProcessReport, Simulation, SimulationReport};

// Metrics
pub use crate::metrics::{Collector, Metric, MetricType, MetricsExporter, MetricsRegistry};

// Timeline
pub use crate::timeline::{EventKind, Timeline, TimelineEvent};

// Error
pub use crate::SchedulerError;
