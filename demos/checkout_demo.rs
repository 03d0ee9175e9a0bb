use checkout_sim::{run_simulation, SimulationConfig};

/// Run the default store once and print a summary
///
/// Pass `--json` to also dump the full report, per-customer records included.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let dump_json = std::env::args().skip(1).any(|arg| arg == "--json");

    let config = SimulationConfig::new()
        .with_customers(100, 3.0)
        .with_lines(2, 1, 2)
        .with_items(1, 20)
        .with_seed(42);

    println!("🛒 Checkout Simulation");
    println!("======================");
    println!(
        "{} customers, mean inter-arrival {}, {} lines",
        config.num_customers,
        config.mean_inter_arrival,
        config.total_lines()
    );

    let report = run_simulation(&config)?;

    println!("\nCompleted: {}/{}", report.completed_count, report.total_customers);
    println!("Average wait:  {:.2}", report.avg_wait_time());
    println!("Maximum wait:  {:.2}", report.max_wait_time());
    println!("Average total: {:.2}", report.avg_total_time());
    println!("Duration:      {:.2}", report.simulation_end_time);

    for line in &report.lines {
        println!(
            "  {} ({}): served {}, avg queue {:.2}, max queue {}",
            line.line_id, line.kind, line.customers_served, line.avg_queue_length, line.max_queue_length
        );
    }

    if dump_json {
        println!("\n{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\nPer kind:");
        println!("{}", serde_json::to_string_pretty(&report.kinds)?);
    }
    Ok(())
}
