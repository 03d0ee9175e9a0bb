use super::types::{CustomerId, LineId, SimTime};
use serde::{Deserialize, Serialize};

/// One shopper moving through the checkout area.
///
/// Timestamps are only written by the simulator that owns the record; other
/// components see it through shared references or [`CustomerRecord`] snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: CustomerId,
    arrival: SimTime,
    items: u32,
    assigned_line: Option<LineId>,
    service_start: Option<SimTime>,
    service_end: Option<SimTime>,
}

impl Customer {
    pub fn new(id: CustomerId, arrival: SimTime, items: u32) -> Self {
        Self {
            id,
            arrival,
            items,
            assigned_line: None,
            service_start: None,
            service_end: None,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    /// Waiting starts the moment the customer arrives
    pub fn wait_start(&self) -> SimTime {
        self.arrival
    }

    pub fn items(&self) -> u32 {
        self.items
    }

    pub fn assigned_line(&self) -> Option<LineId> {
        self.assigned_line
    }

    pub fn service_start(&self) -> Option<SimTime> {
        self.service_start
    }

    pub fn service_end(&self) -> Option<SimTime> {
        self.service_end
    }

    pub fn is_complete(&self) -> bool {
        self.service_end.is_some()
    }

    /// Time spent queueing before service began
    pub fn wait_time(&self) -> Option<SimTime> {
        self.service_start.map(|start| start - self.arrival)
    }

    /// Time from arrival to the end of service
    pub fn total_time(&self) -> Option<SimTime> {
        self.service_end.map(|end| end - self.arrival)
    }

    /// Record the routing decision. Returns false if a line was already assigned.
    pub(crate) fn assign_line(&mut self, line: LineId) -> bool {
        if self.assigned_line.is_some() {
            return false;
        }
        self.assigned_line = Some(line);
        true
    }

    pub(crate) fn begin_service(&mut self, now: SimTime) {
        debug_assert!(now >= self.arrival, "service cannot start before arrival");
        self.service_start = Some(now);
    }

    pub(crate) fn finish_service(&mut self, now: SimTime) {
        debug_assert!(
            self.service_start.map_or(false, |start| now >= start),
            "service must start before it ends"
        );
        self.service_end = Some(now);
    }

    /// Read-only snapshot for reports; `None` until the customer has been served
    pub fn record(&self) -> Option<CustomerRecord> {
        Some(CustomerRecord {
            customer_id: self.id,
            line_id: self.assigned_line?,
            items: self.items,
            arrival: self.arrival,
            service_start: self.service_start?,
            service_end: self.service_end?,
            wait_time: self.wait_time()?,
            total_time: self.total_time()?,
        })
    }
}

/// Completed customer as exposed to report consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub line_id: LineId,
    pub items: u32,
    pub arrival: SimTime,
    pub service_start: SimTime,
    pub service_end: SimTime,
    pub wait_time: SimTime,
    pub total_time: SimTime,
}
