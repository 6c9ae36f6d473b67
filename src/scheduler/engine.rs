use super::Placement;
use crate::error::{Result, SchedulerError};
use crate::metrics::{Collector, Metric, MetricType, MetricsRegistry};
use crate::process::{Process, ProcessId, ProcessState, ProcessTable};
use crate::queue::{Interrupt, InterruptKind, InterruptMailbox, Queue, QueueId, QueueType};
use crate::timeline::{EventKind, Timeline};
use crate::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// Collector for per-queue counters (dispatches, interrupts)
pub const QUEUE_METRICS: &str = "queues";
/// Collector for process lifecycle counters (switches, completions, boosts)
pub const LIFECYCLE_METRICS: &str = "lifecycle";

/// Scheduling history of one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub arrival: u64,
    /// Clock value when the process first got the CPU
    pub first_run: Option<u64>,
    /// Clock value at the end of the tick in which it terminated
    pub completion: Option<u64>,
}

impl ProcessRecord {
    fn new(arrival: u64) -> Self {
        Self {
            arrival,
            first_run: None,
            completion: None,
        }
    }
}

/// Multi-level feedback queue scheduler.
///
/// Owns one CPU queue per configured level plus a single blocking queue
/// for processes waiting on I/O. Each tick the blocking queue and the
/// highest-priority non-empty CPU queue get one unit of work; interrupts
/// raised during the tick are applied once both are done.
#[derive(Debug)]
pub struct MlfqScheduler {
    config: SchedulerConfig,
    levels: Vec<Queue>,
    io_queue: Queue,
    table: ProcessTable,
    mailbox: InterruptMailbox,
    placement: Placement,
    /// Not yet arrived, ordered by arrival time
    pending: Vec<(u64, ProcessId)>,
    records: BTreeMap<ProcessId, ProcessRecord>,
    clock: u64,
    ticks: u64,
    /// Tick count at the last priority boost
    last_boost: u64,
    last_dispatched: Option<ProcessId>,
    metrics: MetricsRegistry,
    timeline: Timeline,
}

impl MlfqScheduler {
    /// Create a scheduler with one CPU queue per configured level
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        config.validate()?;

        let levels = config
            .level_quanta
            .iter()
            .enumerate()
            .map(|(level, &quantum)| {
                Queue::new(QueueId::new(level), level as u32, quantum, QueueType::Cpu)
            })
            .collect::<Result<Vec<_>>>()?;

        let io_level = levels.len();
        let io_queue = Queue::new(
            QueueId::new(io_level),
            io_level as u32,
            config.io_quantum,
            QueueType::Blocking,
        )?;

        debug!(
            "Scheduler created with {} levels, quanta {:?}",
            levels.len(),
            config.level_quanta
        );

        let mut metrics = MetricsRegistry::new();
        metrics.register(QUEUE_METRICS, Collector::new(config.enable_metrics));
        metrics.register(LIFECYCLE_METRICS, Collector::new(config.enable_metrics));

        Ok(Self {
            placement: Placement::new(levels.len(), config.promote_on_ready),
            metrics,
            timeline: Timeline::new(config.enable_timeline),
            config,
            levels,
            io_queue,
            table: ProcessTable::new(),
            mailbox: InterruptMailbox::new(),
            pending: Vec::new(),
            records: BTreeMap::new(),
            clock: 0,
            ticks: 0,
            last_boost: 0,
            last_dispatched: None,
        })
    }

    /// Get scheduler configuration
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Current simulated time
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Ticks executed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// CPU queues, highest priority first
    pub fn levels(&self) -> &[Queue] {
        &self.levels
    }

    /// The single blocking queue, placed after the CPU levels
    pub fn io_queue(&self) -> &Queue {
        &self.io_queue
    }

    /// Look a queue up by id
    pub fn queue(&self, id: QueueId) -> Option<&Queue> {
        if id == self.io_queue.id() {
            Some(&self.io_queue)
        } else {
            self.levels.get(id.index())
        }
    }

    fn queue_mut(&mut self, id: QueueId) -> Result<&mut Queue> {
        if id == self.io_queue.id() {
            Ok(&mut self.io_queue)
        } else {
            self.levels
                .get_mut(id.index())
                .ok_or(SchedulerError::QueueNotFound(id))
        }
    }

    /// Look a process up by id
    pub fn process(&self, id: ProcessId) -> Option<&dyn Process> {
        self.table.get(id)
    }

    /// Every admitted process, finished or not
    pub fn processes(&self) -> &ProcessTable {
        &self.table
    }

    /// Scheduling history of one process
    pub fn record(&self, id: ProcessId) -> Option<&ProcessRecord> {
        self.records.get(&id)
    }

    /// Scheduling history of all admitted processes
    pub fn records(&self) -> impl Iterator<Item = (ProcessId, &ProcessRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Number of processes that have finished
    pub fn completed(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.completion.is_some())
            .count()
    }

    /// Processes admitted but not yet arrived
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is waiting, queued or blocked
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
            && self.io_queue.is_empty()
            && self.levels.iter().all(Queue::is_empty)
    }

    /// Get metrics registry
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    fn count(&mut self, collector: &str, name: &str, labels: &[(&str, String)]) {
        if let Some(collector) = self.metrics.get_mut(collector) {
            collector.increment(name, labels);
        }
    }

    /// Get event timeline
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Hand a process to the scheduler. It joins the top level once the
    /// clock reaches its arrival time.
    pub fn admit(&mut self, process: Box<dyn Process>) -> Result<ProcessId> {
        let id = process.id();
        if self.table.contains(id) {
            return Err(SchedulerError::DuplicateProcess(id));
        }

        let arrival = process.arrival_time();
        self.table.insert(process);
        self.records.insert(id, ProcessRecord::new(arrival));

        let pos = self.pending.partition_point(|&(at, _)| at <= arrival);
        self.pending.insert(pos, (arrival, id));
        Ok(id)
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> Result<()> {
        let elapsed = self.config.tick_length;

        self.admit_arrivals()?;
        self.maybe_boost()?;

        if let Some(pid) = self.io_queue.peek() {
            let io_id = self.io_queue.id();
            self.io_queue
                .do_blocking_work(elapsed, &mut self.table, &mut self.mailbox)?;
            self.reap(io_id, pid)?;
        }

        match self.levels.iter().position(|q| !q.is_empty()) {
            Some(level) => {
                let queue_id = QueueId::new(level);
                let pid = self.levels[level]
                    .peek()
                    .ok_or(SchedulerError::EmptyQueue(queue_id))?;

                self.dispatch(queue_id, pid);
                self.levels[level].do_cpu_work(elapsed, &mut self.table, &mut self.mailbox)?;
                self.reap(queue_id, pid)?;
            }
            None => {
                self.last_dispatched = None;
                trace!("CPU idle at {}", self.clock);
            }
        }

        for interrupt in self.mailbox.drain() {
            self.handle_interrupt(interrupt)?;
        }

        self.clock += elapsed;
        self.ticks += 1;
        Ok(())
    }

    /// Relocate a process named by an interrupt.
    ///
    /// Demotions move one level down (the bottom level keeps its own),
    /// demotions out of the blocking queue rotate it, blocked processes go
    /// to the blocking queue and ready ones return to their level. A
    /// process still sitting in a queue is taken out of it first; one that
    /// has not arrived yet is rejected.
    pub fn handle_interrupt(&mut self, interrupt: Interrupt) -> Result<()> {
        let Interrupt {
            queue,
            process,
            kind,
        } = interrupt;
        let io_id = self.io_queue.id();

        if self.queue(queue).is_none() {
            return Err(SchedulerError::QueueNotFound(queue));
        }
        let current = self
            .table
            .get(process)
            .ok_or(SchedulerError::ProcessNotFound(process))?
            .parent_queue();
        if self.pending.iter().any(|&(_, id)| id == process) {
            return Err(SchedulerError::NotArrived(process));
        }
        if let Some(current) = current {
            if self.queue_mut(current)?.remove(process) {
                debug!("[{}] taken out of {} before relocation", process, current);
            }
        }

        self.count(
            QUEUE_METRICS,
            "interrupts",
            &[("kind", kind.to_string()), ("queue", queue.to_string())],
        );
        self.timeline
            .record(self.clock, queue, process, EventKind::Interrupt(kind));

        let target = match kind {
            InterruptKind::LowerPriority if queue == io_id => io_id,
            InterruptKind::LowerPriority => {
                QueueId::new(self.placement.lower(process, queue.index()))
            }
            InterruptKind::ProcessBlocked => {
                self.placement.block(process, queue.index());
                io_id
            }
            InterruptKind::ProcessReady => QueueId::new(self.placement.ready(process)),
        };

        debug!("[{}] {} from {}, moving to {}", process, kind, queue, target);
        self.enqueue_into(target, process)
    }

    fn enqueue_into(&mut self, target: QueueId, pid: ProcessId) -> Result<()> {
        let queue = if target == self.io_queue.id() {
            &mut self.io_queue
        } else {
            self.levels
                .get_mut(target.index())
                .ok_or(SchedulerError::QueueNotFound(target))?
        };
        let process = self
            .table
            .get_mut(pid)
            .ok_or(SchedulerError::ProcessNotFound(pid))?;

        queue.enqueue(process);
        Ok(())
    }

    fn admit_arrivals(&mut self) -> Result<()> {
        let due = self.pending.partition_point(|&(at, _)| at <= self.clock);
        let arrived: Vec<_> = self.pending.drain(..due).collect();

        for (_, pid) in arrived {
            self.enqueue_into(QueueId::new(0), pid)?;
            self.timeline
                .record(self.clock, QueueId::new(0), pid, EventKind::Admitted);
            info!("[{}] Admitted at {}", pid, self.clock);
        }
        Ok(())
    }

    fn maybe_boost(&mut self) -> Result<()> {
        let Some(interval) = self.config.boost_interval else {
            return Ok(());
        };
        if self.ticks - self.last_boost < interval {
            return Ok(());
        }

        self.last_boost = self.ticks;
        self.placement.boost_all();

        let top = QueueId::new(0);
        let mut boosted = 0usize;
        for level in 1..self.levels.len() {
            for pid in self.levels[level].drain() {
                self.enqueue_into(top, pid)?;
                self.timeline.record(self.clock, top, pid, EventKind::Boosted);
                boosted += 1;
            }
        }

        self.count(LIFECYCLE_METRICS, "boosts", &[]);
        info!("Priority boost at {}: {} processes moved up", self.clock, boosted);
        Ok(())
    }

    fn dispatch(&mut self, queue: QueueId, pid: ProcessId) {
        if let Some(record) = self.records.get_mut(&pid) {
            record.first_run.get_or_insert(self.clock);
        }

        if self.last_dispatched != Some(pid) {
            self.count(LIFECYCLE_METRICS, "context_switches", &[]);
            self.last_dispatched = Some(pid);
            trace!("[{}] switched in from {} at {}", pid, queue, self.clock);
        }

        self.count(QUEUE_METRICS, "dispatches", &[("queue", queue.to_string())]);
        self.timeline
            .record(self.clock, queue, pid, EventKind::Dispatched);
    }

    /// Take a finished process off the head of `queue`
    fn reap(&mut self, queue: QueueId, pid: ProcessId) -> Result<()> {
        let terminated = self
            .table
            .get(pid)
            .map_or(false, |p| p.state() == ProcessState::Terminated);
        if !terminated {
            return Ok(());
        }

        let owner = self.queue_mut(queue)?;
        if owner.peek() == Some(pid) {
            owner.dequeue();
        }

        let completion = self.clock + self.config.tick_length;
        if let Some(record) = self.records.get_mut(&pid) {
            record.completion = Some(completion);
        }
        self.placement.forget(pid);
        if self.last_dispatched == Some(pid) {
            self.last_dispatched = None;
        }

        let completed = self.completed() as f64;
        self.count(LIFECYCLE_METRICS, "completions", &[]);
        if let Some(collector) = self.metrics.get_mut(LIFECYCLE_METRICS) {
            collector.record(Metric::new("completed", MetricType::Gauge, completed));
        }
        self.timeline.record(self.clock, queue, pid, EventKind::Completed);
        info!("[{}] Completed at {}", pid, completion);
        Ok(())
    }
}
