use super::customer::Customer;
use super::errors::{Result, SimulationError};
use super::types::{CustomerId, LineId, SimTime};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Largest basket an express line accepts
pub const EXPRESS_ITEM_LIMIT: u32 = 7;

/// Checkout line variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Standard,
    Express,
    SelfServe,
}

impl LineKind {
    /// All kinds in the order the store lays its lines out
    pub const ALL: [LineKind; 3] = [LineKind::Standard, LineKind::Express, LineKind::SelfServe];

    /// Service formula and eligibility predicate for this kind
    pub fn profile(self) -> LineProfile {
        match self {
            LineKind::Standard => LineProfile {
                service_time: |n| f64::from(n) + 7.0,
                accepts: |_| true,
            },
            LineKind::Express => LineProfile {
                service_time: |n| f64::from(n) + 4.0,
                accepts: |n| n <= EXPRESS_ITEM_LIMIT,
            },
            LineKind::SelfServe => LineProfile {
                service_time: |n| 2.0 * f64::from(n) + 1.0,
                accepts: |_| true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LineKind::Standard => "standard",
            LineKind::Express => "express",
            LineKind::SelfServe => "self_serve",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-kind behavior, chosen once when the line is built
#[derive(Clone, Copy)]
pub struct LineProfile {
    pub service_time: fn(u32) -> SimTime,
    pub accepts: fn(u32) -> bool,
}

impl std::fmt::Debug for LineProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineProfile").finish_non_exhaustive()
    }
}

/// Customer currently occupying a line's server
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InService {
    pub customer: CustomerId,
    pub started: SimTime,
    pub duration: SimTime,
}

/// A single-server checkout line with a FIFO waiting sequence
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    id: LineId,
    kind: LineKind,
    profile: LineProfile,
    open: bool,
    waiting: VecDeque<CustomerId>,
    in_service: Option<InService>,
    customers_served: u64,
    total_service_time: SimTime,
    // Time-weighted waiting-length accumulator
    queue_area: f64,
    last_sample_time: SimTime,
    sampled_length: usize,
    max_queue_length: usize,
}

impl CheckoutLine {
    pub fn new(id: LineId, kind: LineKind) -> Self {
        Self {
            id,
            kind,
            profile: kind.profile(),
            open: true,
            waiting: VecDeque::new(),
            in_service: None,
            customers_served: 0,
            total_service_time: 0.0,
            queue_area: 0.0,
            last_sample_time: 0.0,
            sampled_length: 0,
            max_queue_length: 0,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether this line's kind takes a basket of `items` items (ignores open/closed)
    pub fn accepts(&self, items: u32) -> bool {
        (self.profile.accepts)(items)
    }

    /// Service duration for a basket of `items` items
    pub fn service_time(&self, items: u32) -> SimTime {
        (self.profile.service_time)(items)
    }

    /// Customers waiting plus the one in service
    pub fn load(&self) -> usize {
        self.waiting.len() + usize::from(self.in_service.is_some())
    }

    /// Customers waiting, excluding the one in service
    pub fn queue_length(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_service.is_none()
    }

    pub fn in_service(&self) -> Option<&InService> {
        self.in_service.as_ref()
    }

    pub fn waiting(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn customers_served(&self) -> u64 {
        self.customers_served
    }

    pub fn total_service_time(&self) -> SimTime {
        self.total_service_time
    }

    pub fn max_queue_length(&self) -> usize {
        self.max_queue_length
    }

    /// Integral of waiting length over simulated time up to the last sample
    pub fn queue_area(&self) -> f64 {
        self.queue_area
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    pub(crate) fn enqueue(&mut self, customer: CustomerId) {
        self.waiting.push_back(customer);
    }

    /// Move the head of the waiting sequence onto the server.
    ///
    /// `customer` must be the record for the current head. Returns the service
    /// duration, or `None` when the line is busy or has nobody waiting.
    pub(crate) fn begin_service(
        &mut self,
        customer: &mut Customer,
        now: SimTime,
    ) -> Result<Option<SimTime>> {
        if self.in_service.is_some() {
            return Ok(None);
        }
        let head = match self.waiting.front() {
            Some(head) => *head,
            None => return Ok(None),
        };
        if head != customer.id() {
            return Err(SimulationError::Internal(format!(
                "{} asked to serve {} but its head is {}",
                self.id,
                customer.id(),
                head
            )));
        }
        self.waiting.pop_front();

        let duration = self.service_time(customer.items());
        customer.begin_service(now);
        self.in_service = Some(InService {
            customer: head,
            started: now,
            duration,
        });
        Ok(Some(duration))
    }

    /// Release the server, crediting the line with the finished service
    pub(crate) fn complete_service(&mut self, customer: &mut Customer, now: SimTime) -> Result<()> {
        match self.in_service {
            Some(current) if current.customer == customer.id() => {
                self.in_service = None;
                self.customers_served += 1;
                self.total_service_time += current.duration;
                customer.finish_service(now);
                Ok(())
            }
            _ => Err(SimulationError::Internal(format!(
                "{} completed {} which it was not serving",
                self.id,
                customer.id()
            ))),
        }
    }

    /// Fold the waiting length held since the previous sample into the accumulator
    pub(crate) fn record_queue_sample(&mut self, now: SimTime) {
        if now > self.last_sample_time {
            self.queue_area += self.sampled_length as f64 * (now - self.last_sample_time);
            self.last_sample_time = now;
        }
        self.sampled_length = self.waiting.len();
        self.max_queue_length = self.max_queue_length.max(self.sampled_length);
    }
}
