use mlfq_queue::prelude::*;

fn main() -> Result<(), SchedulerError> {
    println!("=== MLFQ Scheduling Demo ===\n");

    let config = SchedulerConfig::new()
        .with_doubling_levels(4, 10)
        .with_io_quantum(5)
        .with_boost_interval(200)
        .with_timeline(true);

    println!("Scheduler configuration:");
    println!("  Level quanta: {:?}", config.level_quanta);
    println!("  I/O quantum: {}", config.io_quantum);
    println!("  Boost interval: {:?}", config.boost_interval);

    let mut sim = Simulation::with_config(config)?;

    let workload = vec![
        SimProcess::cpu_bound("number-cruncher", 150)?,
        SimProcess::new(
            "text-editor",
            vec![
                Burst::Cpu(2),
                Burst::Io(15),
                Burst::Cpu(2),
                Burst::Io(15),
                Burst::Cpu(2),
            ],
        )?,
        SimProcess::with_arrival(
            "compiler",
            20,
            vec![Burst::Cpu(60), Burst::Io(10), Burst::Cpu(40)],
        )?,
        SimProcess::with_arrival("backup", 40, vec![Burst::Cpu(5), Burst::Io(50), Burst::Cpu(5)])?,
    ];

    for process in workload {
        let name = process.name().to_string();
        let id = sim.admit(process)?;
        println!("  Admitted {} '{}'", id, name);
    }

    let report = sim.run()?;

    println!("\n--- Results after {} ticks ---", report.ticks);
    println!(
        "{:<6} {:<16} {:>8} {:>10} {:>10} {:>6} {:>9}",
        "id", "name", "arrival", "completion", "turnaround", "wait", "response"
    );
    for p in &report.processes {
        println!(
            "{:<6} {:<16} {:>8} {:>10} {:>10} {:>6} {:>9}",
            p.id.to_string(),
            p.name,
            p.arrival,
            p.completion.unwrap_or_default(),
            p.turnaround.unwrap_or_default(),
            p.wait.unwrap_or_default(),
            p.response.unwrap_or_default(),
        );
    }

    println!("\nAverage turnaround: {:.2}", report.avg_turnaround);
    println!("Average wait:       {:.2}", report.avg_wait);
    println!("Average response:   {:.2}", report.avg_response);
    println!("Throughput:         {:.4} per time unit", report.throughput);

    let demotions = sim
        .scheduler()
        .timeline()
        .events()
        .iter()
        .filter(|e| e.kind == EventKind::Interrupt(InterruptKind::LowerPriority))
        .count();
    println!("\n✓ {} LOWER_PRIORITY interrupts handled", demotions);
    println!("\nMetrics:\n{}", sim.export_metrics()?);

    Ok(())
}
