pub mod core;

// Re-export commonly used types
pub use crate::core::arrivals::{Arrival, ArrivalProcess};
pub use crate::core::checkout_line::{CheckoutLine, LineKind};
pub use crate::core::customer::{Customer, CustomerRecord};
pub use crate::core::errors::{Result, SimulationError};
pub use crate::core::event::{Event, EventHandle, EventKind};
pub use crate::core::event_queue::EventQueue;
pub use crate::core::execution::{
    run_batch, run_simulation, BatchConfig, ConcurrencyMode, SimulationConfig, SimulationObserver,
    Simulator,
};
pub use crate::core::statistics::{SimulationReport, StatisticsCollector};
pub use crate::core::store::{RoutingDecision, Store};
pub use crate::core::types::{CustomerId, LineId, SimTime};
