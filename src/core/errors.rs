//! Error types for checkout simulation runs
//!
//! Every variant aborts the current run. None of them is transient: the
//! caller has to change the configuration (or fix the engine) and start over.

use super::types::{CustomerId, SimTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Invalid or contradictory parameters, reported at construction
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// No open line accepts the arriving customer's item count
    #[error("No eligible line for {customer} with {items} items")]
    NoEligibleLine { customer: CustomerId, items: u32 },

    /// Attempt to schedule an event before the last consumed timestamp
    #[error("Invalid event timestamp {requested} (current time {now})")]
    InvalidTimestamp { requested: SimTime, now: SimTime },

    /// The event queue drained while a customer still lacked a service end
    #[error("Run drained with {customer} never finishing service")]
    IncompleteRun { customer: CustomerId },

    /// Dispatch reached a state the engine never produces on its own
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

impl SimulationError {
    /// Whether the error stems from the caller's configuration rather than an engine defect
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SimulationError::Configuration(_) | SimulationError::NoEligibleLine { .. }
        )
    }
}
