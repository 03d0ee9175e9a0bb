use super::types::{CustomerId, LineId, SimTime};

/// What a scheduled event does when it fires, with its kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// A new customer with `items` items walks up to the checkout area
    Arrival { items: u32 },
    /// `customer` finishes being served at `line`
    ServiceCompletion { line: LineId, customer: CustomerId },
    /// `line` stops accepting new customers
    LineClosure { line: LineId },
}

impl EventKind {
    /// Short tag used in logs
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Arrival { .. } => "arrival",
            EventKind::ServiceCompletion { .. } => "service_completion",
            EventKind::LineClosure { .. } => "line_closure",
        }
    }
}

/// Handle returned by the queue for a scheduled event: its insertion sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventHandle(pub(crate) u64);

impl EventHandle {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// An event popped from the queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub timestamp: SimTime,
    pub handle: EventHandle,
    pub kind: EventKind,
}

impl Event {
    pub fn new(timestamp: SimTime, handle: EventHandle, kind: EventKind) -> Self {
        Self {
            timestamp,
            handle,
            kind,
        }
    }
}
