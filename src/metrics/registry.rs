use super::Collector;
use std::collections::BTreeMap;

/// Metrics registry
#[derive(Debug, Clone, Default)]
pub struct MetricsRegistry {
    collectors: BTreeMap<String, Collector>,
}

impl MetricsRegistry {
    /// Create a new registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register collector
    pub fn register(&mut self, name: impl Into<String>, collector: Collector) {
        self.collectors.insert(name.into(), collector);
    }

    /// Get collector
    pub fn get(&self, name: &str) -> Option<&Collector> {
        self.collectors.get(name)
    }

    /// Get mutable collector
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collector> {
        self.collectors.get_mut(name)
    }

    /// Get all collectors, ordered by name
    pub fn collectors(&self) -> impl Iterator<Item = (&String, &Collector)> {
        self.collectors.iter()
    }

    /// Sum of the metric `name` across every collector
    pub fn total(&self, name: &str) -> f64 {
        self.collectors.values().map(|c| c.total(name)).sum()
    }
}
