use crate::metrics::MetricsExporter;
use crate::process::{Process, ProcessId};
use crate::scheduler::MlfqScheduler;
use crate::{SchedulerConfig, SchedulerError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of one process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub id: ProcessId,
    pub name: String,
    pub arrival: u64,
    pub first_run: Option<u64>,
    pub completion: Option<u64>,
    pub cpu_time: u64,
    pub io_time: u64,
    /// Completion minus arrival
    pub turnaround: Option<u64>,
    /// Turnaround not spent on the CPU or on I/O
    pub wait: Option<u64>,
    /// First run minus arrival
    pub response: Option<u64>,
}

/// Summary of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub ticks: u64,
    pub clock: u64,
    pub completed: usize,
    pub processes: Vec<ProcessReport>,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    pub avg_response: f64,
    /// Completed processes per time unit
    pub throughput: f64,
}

impl SimulationReport {
    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, SchedulerError> {
        serde_json::to_string_pretty(self).map_err(|e| SchedulerError::Serialization(e.to_string()))
    }

    pub fn process(&self, id: ProcessId) -> Option<&ProcessReport> {
        self.processes.iter().find(|p| p.id == id)
    }
}

/// Drives an [`MlfqScheduler`] tick by tick
pub struct Simulation {
    scheduler: MlfqScheduler,
}

impl Simulation {
    /// Create a simulation with default configuration
    pub fn new() -> Result<Self, SchedulerError> {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create a simulation with custom configuration
    pub fn with_config(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Ok(Self {
            scheduler: MlfqScheduler::new(config)?,
        })
    }

    /// Get simulation configuration
    pub fn config(&self) -> &SchedulerConfig {
        self.scheduler.config()
    }

    pub fn scheduler(&self) -> &MlfqScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut MlfqScheduler {
        &mut self.scheduler
    }

    /// Add a process to the workload
    pub fn admit(&mut self, process: impl Process + 'static) -> Result<ProcessId, SchedulerError> {
        let name = process.name().to_string();
        let id = self.scheduler.admit(Box::new(process))?;
        debug!("[{}] Process '{}' queued for arrival", id, name);
        Ok(id)
    }

    /// Run a single tick
    pub fn step(&mut self) -> Result<(), SchedulerError> {
        self.scheduler.tick()
    }

    /// Check if every admitted process has finished
    pub fn is_finished(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Run until every process has finished
    pub fn run(&mut self) -> Result<SimulationReport, SchedulerError> {
        let max_ticks = self.config().max_ticks;
        info!(
            "Simulation starting with {} processes",
            self.scheduler.processes().len()
        );

        while !self.is_finished() {
            if self.scheduler.ticks() >= max_ticks {
                warn!("Simulation stopped after {} ticks", max_ticks);
                return Err(SchedulerError::TickLimitExceeded(max_ticks));
            }
            self.step()?;
        }

        let report = self.report();
        info!(
            "Simulation finished at {}: {} completed, avg turnaround {:.2}",
            report.clock, report.completed, report.avg_turnaround
        );
        Ok(report)
    }

    /// Build a report of the current state
    pub fn report(&self) -> SimulationReport {
        let processes: Vec<ProcessReport> = self
            .scheduler
            .records()
            .filter_map(|(id, record)| {
                let process = self.scheduler.process(id)?;
                let turnaround = record.completion.map(|c| c.saturating_sub(record.arrival));
                Some(ProcessReport {
                    id,
                    name: process.name().to_string(),
                    arrival: record.arrival,
                    first_run: record.first_run,
                    completion: record.completion,
                    cpu_time: process.cpu_time(),
                    io_time: process.io_time(),
                    turnaround,
                    wait: turnaround
                        .map(|t| t.saturating_sub(process.cpu_time() + process.io_time())),
                    response: record.first_run.map(|f| f.saturating_sub(record.arrival)),
                })
            })
            .collect();

        let finished: Vec<&ProcessReport> =
            processes.iter().filter(|p| p.completion.is_some()).collect();
        let completed = finished.len();
        let average = |f: fn(&ProcessReport) -> Option<u64>| -> f64 {
            if completed == 0 {
                return 0.0;
            }
            finished.iter().filter_map(|p| f(p)).sum::<u64>() as f64 / completed as f64
        };

        let clock = self.scheduler.clock();
        SimulationReport {
            ticks: self.scheduler.ticks(),
            clock,
            completed,
            avg_turnaround: average(|p| p.turnaround),
            avg_wait: average(|p| p.wait),
            avg_response: average(|p| p.response),
            throughput: if clock == 0 {
                0.0
            } else {
                completed as f64 / clock as f64
            },
            processes,
        }
    }

    /// Export collected metrics as JSON
    pub fn export_metrics(&self) -> Result<String, SchedulerError> {
        MetricsExporter::new(self.scheduler.metrics())
            .export_json()
            .map_err(|e| SchedulerError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Burst, SimProcess};

    #[test]
    fn test_single_process_is_demoted_to_bottom() {
        let config = SchedulerConfig::new().with_levels(vec![2, 4]);
        let mut sim = Simulation::with_config(config).unwrap();
        let id = sim.admit(SimProcess::cpu_bound("cpu", 7).unwrap()).unwrap();

        let report = sim.run().unwrap();
        let p = report.process(id).unwrap();

        assert_eq!(p.completion, Some(7));
        assert_eq!(p.wait, Some(0));
        assert_eq!(sim.scheduler().metrics().total("interrupts"), 2.0);
    }

    #[test]
    fn test_two_processes_share_levels() {
        let config = SchedulerConfig::new().with_levels(vec![2, 4]);
        let mut sim = Simulation::with_config(config).unwrap();
        let a = sim.admit(SimProcess::cpu_bound("a", 4).unwrap()).unwrap();
        let b = sim.admit(SimProcess::cpu_bound("b", 4).unwrap()).unwrap();

        let report = sim.run().unwrap();

        let a = report.process(a).unwrap();
        let b = report.process(b).unwrap();
        assert_eq!((a.first_run, a.completion, a.wait), (Some(0), Some(6), Some(2)));
        assert_eq!((b.first_run, b.completion, b.wait), (Some(2), Some(8), Some(4)));
        assert_eq!(report.avg_turnaround, 7.0);
        assert_eq!(report.completed, 2);
    }

    #[test]
    fn test_io_process_keeps_top_level() {
        let config = SchedulerConfig::new().with_levels(vec![4, 8]).with_timeline(true);
        let mut sim = Simulation::with_config(config).unwrap();
        let id = sim
            .admit(SimProcess::new("io", vec![Burst::Cpu(2), Burst::Io(3), Burst::Cpu(2)]).unwrap())
            .unwrap();

        let report = sim.run().unwrap();
        let p = report.process(id).unwrap();
        assert_eq!(p.completion, Some(7));
        assert_eq!(p.io_time, 3);
        assert_eq!(p.wait, Some(0));

        let timeline = sim.scheduler().timeline();
        assert!(timeline
            .for_process(id)
            .filter(|e| e.kind == crate::timeline::EventKind::Dispatched)
            .all(|e| e.queue.index() == 0));
    }
}
