use crate::core::errors::{Result, SimulationError};
use crate::core::execution::config::{BatchConfig, ConcurrencyMode, SimulationConfig};
use crate::core::execution::simulator::run_simulation;
use crate::core::statistics::SimulationReport;
use log::info;
use rayon::prelude::*;

/// Run independent configurations and return their outcomes in input order.
///
/// Each run builds its own queue, store and random source, so parallel runs
/// share nothing. A failing run does not stop the others; the outer error is
/// only returned when the thread pool cannot be built.
pub fn run_batch(
    configs: &[SimulationConfig],
    batch: &BatchConfig,
) -> Result<Vec<Result<SimulationReport>>> {
    info!(
        "Running {} configurations ({:?})",
        configs.len(),
        batch.concurrency_mode
    );

    match batch.concurrency_mode {
        ConcurrencyMode::Sequential => Ok(configs.iter().map(run_simulation).collect()),
        ConcurrencyMode::Rayon => {
            let run_all = || configs.par_iter().map(run_simulation).collect::<Vec<_>>();
            match batch.thread_pool_size {
                Some(size) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(size)
                        .build()
                        .map_err(|err| {
                            SimulationError::Configuration(format!("thread pool: {}", err))
                        })?;
                    Ok(pool.install(run_all))
                }
                None => Ok(run_all()),
            }
        }
    }
}
