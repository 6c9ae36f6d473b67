//! Scheduling metrics collection and export

/// Metrics collector
pub mod collector;
/// Metrics exporter
pub mod exporter;
/// Metrics registry
pub mod registry;

pub use collector::{Collector, Metric, MetricType};
pub use exporter::MetricsExporter;
pub use registry::MetricsRegistry;
