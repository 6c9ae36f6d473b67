use serde::{Deserialize, Serialize};

/// Type of metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricType {
    /// Counter (monotonically increasing)
    Counter,
    /// Gauge (can go up or down)
    Gauge,
}

/// Metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    name: String,
    metric_type: MetricType,
    value: f64,
    labels: Vec<(String, String)>,
}

impl Metric {
    /// Create a new metric
    pub fn new(name: impl Into<String>, metric_type: MetricType, value: f64) -> Self {
        Self {
            name: name.into(),
            metric_type,
            value,
            labels: Vec::new(),
        }
    }

    /// Add label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    /// Get name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get type
    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    /// Get value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get labels
    pub fn labels(&self) -> &[(String, String)] {
        &self.labels
    }

    fn same_series(&self, other: &Metric) -> bool {
        self.name == other.name && self.labels == other.labels
    }
}

/// Metrics collector.
///
/// Counters recorded twice with the same name and labels are summed;
/// gauges are overwritten.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    enabled: bool,
    metrics: Vec<Metric>,
}

impl Collector {
    /// Create a new collector
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            metrics: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record metric
    pub fn record(&mut self, metric: Metric) {
        if !self.enabled {
            return;
        }

        match self.metrics.iter_mut().find(|m| m.same_series(&metric)) {
            Some(existing) => match metric.metric_type {
                MetricType::Counter => existing.value += metric.value,
                MetricType::Gauge => existing.value = metric.value,
            },
            None => self.metrics.push(metric),
        }
    }

    /// Bump a counter by one
    pub fn increment(&mut self, name: &str, labels: &[(&str, String)]) {
        let metric = labels
            .iter()
            .fold(Metric::new(name, MetricType::Counter, 1.0), |m, (k, v)| {
                m.with_label(*k, v.clone())
            });
        self.record(metric);
    }

    /// Sum of every series called `name`
    pub fn total(&self, name: &str) -> f64 {
        self.metrics
            .iter()
            .filter(|m| m.name == name)
            .map(|m| m.value)
            .sum()
    }

    /// Get all metrics
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Clear metrics
    pub fn clear(&mut self) {
        self.metrics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_sum_per_series() {
        let mut collector = Collector::new(true);
        collector.increment("interrupts", &[("kind", "LOWER_PRIORITY".to_string())]);
        collector.increment("interrupts", &[("kind", "LOWER_PRIORITY".to_string())]);
        collector.increment("interrupts", &[("kind", "PROCESS_READY".to_string())]);

        assert_eq!(collector.metrics().len(), 2);
        assert_eq!(collector.total("interrupts"), 3.0);
    }

    #[test]
    fn disabled_collector_records_nothing() {
        let mut collector = Collector::new(false);
        collector.record(Metric::new("ticks", MetricType::Gauge, 4.0));
        assert!(collector.metrics().is_empty());
    }
}
