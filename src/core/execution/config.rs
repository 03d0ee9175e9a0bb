//! Configuration for checkout simulation runs
//!
//! This module provides the parameters of a single run (store layout, customer
//! traffic, seed, cutoffs) and the settings for running several independent
//! runs side by side.

use crate::core::errors::{Result, SimulationError};
use crate::core::types::{LineId, SimTime};
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes for batches of runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Runs execute one after another on the calling thread
    Sequential,
    /// Runs execute concurrently on a Rayon thread pool
    Rayon,
}

impl Default for ConcurrencyMode {
    fn default() -> Self {
        ConcurrencyMode::Sequential
    }
}

/// Scheduled closure of one checkout line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineClosure {
    pub line: LineId,
    pub at: SimTime,
}

/// Parameters of one simulation run
///
/// Callers are expected to hand in range-checked values; `validate` only
/// rejects combinations the engine cannot run at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of customers the arrival process generates
    pub num_customers: usize,
    /// Mean of the exponential inter-arrival distribution
    pub mean_inter_arrival: f64,
    pub standard_lines: usize,
    pub express_lines: usize,
    pub self_serve_lines: usize,
    /// Smallest basket, inclusive
    pub min_items: u32,
    /// Largest basket, inclusive
    pub max_items: u32,
    pub seed: u64,
    /// Load at which routing starts preferring other lines
    pub line_capacity: Option<usize>,
    /// Lines that stop accepting customers part-way through the run
    pub line_closures: Vec<LineClosure>,
    /// Stop after this many processed events
    pub max_events: Option<u64>,
    /// Stop before processing any event later than this
    pub max_time: Option<SimTime>,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// 50 customers arriving every 5 time units on average, 2 standard,
    /// 1 express and 2 self-serve lines, baskets of 1 to 20 items, seed 42.
    pub fn new() -> Self {
        Self {
            num_customers: 50,
            mean_inter_arrival: 5.0,
            standard_lines: 2,
            express_lines: 1,
            self_serve_lines: 2,
            min_items: 1,
            max_items: 20,
            seed: 42,
            line_capacity: None,
            line_closures: Vec::new(),
            max_events: None,
            max_time: None,
        }
    }

    pub fn with_customers(mut self, num_customers: usize, mean_inter_arrival: f64) -> Self {
        self.num_customers = num_customers;
        self.mean_inter_arrival = mean_inter_arrival;
        self
    }

    /// Set the number of lines of each kind
    pub fn with_lines(mut self, standard: usize, express: usize, self_serve: usize) -> Self {
        self.standard_lines = standard;
        self.express_lines = express;
        self.self_serve_lines = self_serve;
        self
    }

    pub fn with_items(mut self, min_items: u32, max_items: u32) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = Some(capacity);
        self
    }

    pub fn with_line_closure(mut self, line: LineId, at: SimTime) -> Self {
        self.line_closures.push(LineClosure { line, at });
        self
    }

    pub fn with_max_events(mut self, max_events: u64) -> Self {
        self.max_events = Some(max_events);
        self
    }

    pub fn with_max_time(mut self, max_time: SimTime) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn total_lines(&self) -> usize {
        self.standard_lines + self.express_lines + self.self_serve_lines
    }

    /// Reject internally inconsistent parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_items < 1 {
            return Err(SimulationError::Configuration(
                "minimum item count must be at least 1".to_string(),
            ));
        }
        if self.min_items > self.max_items {
            return Err(SimulationError::Configuration(format!(
                "minimum item count {} exceeds maximum {}",
                self.min_items, self.max_items
            )));
        }
        if self.total_lines() == 0 {
            return Err(SimulationError::Configuration(
                "store needs at least one checkout line".to_string(),
            ));
        }
        if !self.mean_inter_arrival.is_finite() || self.mean_inter_arrival < 0.0 {
            return Err(SimulationError::Configuration(format!(
                "mean inter-arrival time must be finite and non-negative, got {}",
                self.mean_inter_arrival
            )));
        }
        if self.line_capacity == Some(0) {
            return Err(SimulationError::Configuration(
                "line capacity must be at least 1".to_string(),
            ));
        }
        for closure in &self.line_closures {
            if closure.line.value() >= self.total_lines() {
                return Err(SimulationError::Configuration(format!(
                    "closure references {} but the store has {} lines",
                    closure.line,
                    self.total_lines()
                )));
            }
            if !closure.at.is_finite() || closure.at < 0.0 {
                return Err(SimulationError::Configuration(format!(
                    "closure time for {} must be finite and non-negative, got {}",
                    closure.line, closure.at
                )));
            }
        }
        if let Some(max_time) = self.max_time {
            if !max_time.is_finite() || max_time < 0.0 {
                return Err(SimulationError::Configuration(format!(
                    "max time must be finite and non-negative, got {}",
                    max_time
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for executing a batch of independent runs
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// The concurrency mode to use for execution
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel execution
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency mode for the batch
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.total_lines(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new()
            .with_customers(10, 2.0)
            .with_lines(1, 0, 3)
            .with_items(2, 4)
            .with_seed(7)
            .with_max_events(100);

        assert_eq!(config.num_customers, 10);
        assert_eq!(config.self_serve_lines, 3);
        assert_eq!(config.min_items, 2);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_events, Some(100));
    }

    #[test]
    fn test_rejects_inconsistent_values() {
        let cases = [
            SimulationConfig::new().with_items(5, 2),
            SimulationConfig::new().with_items(0, 2),
            SimulationConfig::new().with_lines(0, 0, 0),
            SimulationConfig::new().with_customers(10, -1.0),
            SimulationConfig::new().with_line_capacity(0),
            SimulationConfig::new().with_line_closure(LineId::new(5), 1.0),
            SimulationConfig::new().with_line_closure(LineId::new(0), -1.0),
            SimulationConfig::new().with_max_time(f64::NAN),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(SimulationError::Configuration(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new()
            .with_concurrency(ConcurrencyMode::Rayon)
            .with_thread_pool_size(4);

        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
        assert_eq!(config.thread_pool_size, Some(4));
        assert_eq!(BatchConfig::default().concurrency_mode, ConcurrencyMode::Sequential);
    }
}
