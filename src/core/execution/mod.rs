pub mod batch;
pub mod config;
pub mod simulator;

// Re-export commonly used types
pub use batch::run_batch;
pub use config::{BatchConfig, ConcurrencyMode, LineClosure, SimulationConfig};
pub use simulator::{run_simulation, RunState, SimulationObserver, Simulator};
