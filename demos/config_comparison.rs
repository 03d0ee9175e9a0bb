use checkout_sim::{run_batch, BatchConfig, ConcurrencyMode, SimulationConfig};
use std::time::Instant;

/// Compare store layouts under the same traffic, running them in parallel
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let layouts = [
        ("Small Store", (1, 1, 1)),
        ("Medium Store", (2, 1, 2)),
        ("Large Store", (4, 2, 4)),
        ("No Express", (3, 0, 2)),
        ("Self-Serve Only", (0, 0, 5)),
    ];

    let configs: Vec<SimulationConfig> = layouts
        .iter()
        .map(|(_, (standard, express, self_serve))| {
            SimulationConfig::new()
                .with_customers(200, 3.0)
                .with_lines(*standard, *express, *self_serve)
                .with_items(1, 15)
                .with_seed(42)
        })
        .collect();

    let batch = BatchConfig::new().with_concurrency(ConcurrencyMode::Rayon);
    let start = Instant::now();
    let results = run_batch(&configs, &batch)?;
    println!("📊 {} layouts in {:.2?}", configs.len(), start.elapsed());

    for ((name, _), result) in layouts.iter().zip(results) {
        match result {
            Ok(report) => println!(
                "{:<16} avg wait {:>8.2}  max wait {:>8.2}  duration {:>8.2}",
                name,
                report.avg_wait_time(),
                report.max_wait_time(),
                report.simulation_end_time
            ),
            Err(err) => println!("{:<16} failed: {}", name, err),
        }
    }

    Ok(())
}
