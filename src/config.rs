use crate::error::{Result, SchedulerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Quantum of each CPU level, highest priority first
    pub level_quanta: Vec<u64>,

    /// Quantum of the blocking (I/O) queue
    pub io_quantum: u64,

    /// Time units that pass per tick
    pub tick_length: u64,

    /// Move every process back to the top level once this many ticks
    /// have run since the last boost, whatever the tick length
    pub boost_interval: Option<u64>,

    /// Return processes one level higher when their I/O completes
    pub promote_on_ready: bool,

    /// Stop a run that has not finished after this many ticks
    pub max_ticks: u64,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Record a timeline of scheduling events
    pub enable_timeline: bool,
}

impl SchedulerConfig {
    /// Create a new scheduler configuration: four levels with doubling quanta
    pub fn new() -> Self {
        Self {
            level_quanta: doubling_quanta(4, 10),
            io_quantum: 10,
            tick_length: 1,
            boost_interval: None,
            promote_on_ready: false,
            max_ticks: 100_000,
            enable_metrics: true,
            enable_timeline: false,
        }
    }

    /// Load configuration from JSON text. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchedulerError::ConfigError(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SchedulerError::ConfigError(format!("Could not read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Set explicit level quanta
    pub fn with_levels(mut self, quanta: Vec<u64>) -> Self {
        self.level_quanta = quanta;
        self
    }

    /// Use `count` levels whose quanta double from `base`
    pub fn with_doubling_levels(mut self, count: usize, base: u64) -> Self {
        self.level_quanta = doubling_quanta(count, base);
        self
    }

    /// Set I/O queue quantum
    pub fn with_io_quantum(mut self, quantum: u64) -> Self {
        self.io_quantum = quantum;
        self
    }

    /// Set tick length
    pub fn with_tick_length(mut self, length: u64) -> Self {
        self.tick_length = length;
        self
    }

    /// Enable periodic priority boost
    pub fn with_boost_interval(mut self, interval: u64) -> Self {
        self.boost_interval = Some(interval);
        self
    }

    /// Enable/disable promotion after I/O
    pub fn with_promote_on_ready(mut self, enable: bool) -> Self {
        self.promote_on_ready = enable;
        self
    }

    /// Set tick limit
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// Enable/disable metrics
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Enable/disable the timeline
    pub fn with_timeline(mut self, enable: bool) -> Self {
        self.enable_timeline = enable;
        self
    }

    /// Check the configuration can drive a scheduler
    pub fn validate(&self) -> Result<()> {
        if self.level_quanta.is_empty() {
            return Err(SchedulerError::ConfigError(
                "At least one CPU level is required".to_string(),
            ));
        }
        if let Some(level) = self.level_quanta.iter().position(|&q| q == 0) {
            return Err(SchedulerError::ConfigError(format!(
                "Level {} has a zero quantum",
                level
            )));
        }
        if self.io_quantum == 0 {
            return Err(SchedulerError::ConfigError(
                "I/O quantum must be positive".to_string(),
            ));
        }
        if self.tick_length == 0 {
            return Err(SchedulerError::ConfigError(
                "Tick length must be positive".to_string(),
            ));
        }
        if self.boost_interval == Some(0) {
            return Err(SchedulerError::ConfigError(
                "Boost interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn doubling_quanta(count: usize, base: u64) -> Vec<u64> {
    (0..count).map(|i| base.saturating_mul(1 << i.min(63))).collect()
}
