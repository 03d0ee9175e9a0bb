use super::checkout_line::{CheckoutLine, LineKind};
use super::customer::Customer;
use super::errors::{Result, SimulationError};
use super::types::{CustomerId, LineId, SimTime};
use log::{debug, warn};

/// Load of one line at the moment a routing decision was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLoad {
    pub line: LineId,
    pub load: usize,
    pub eligible: bool,
}

/// Outcome of routing one customer, with the pre-assignment load of every line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub chosen: LineId,
    pub loads: Vec<LineLoad>,
    /// Every eligible line was at capacity, so capacity was ignored
    pub capacity_fallback: bool,
}

/// Owns the fixed set of checkout lines and decides where customers queue
#[derive(Debug, Clone)]
pub struct Store {
    lines: Vec<CheckoutLine>,
    line_capacity: Option<usize>,
}

impl Store {
    /// Build lines in kind order: standard, then express, then self-serve.
    /// Line identifiers follow that order starting at 0.
    pub fn new(standard: usize, express: usize, self_serve: usize) -> Result<Self> {
        let counts = [standard, express, self_serve];
        if counts.iter().sum::<usize>() == 0 {
            return Err(SimulationError::Configuration(
                "store needs at least one checkout line".to_string(),
            ));
        }

        let mut lines = Vec::with_capacity(counts.iter().sum());
        for (kind, count) in LineKind::ALL.into_iter().zip(counts) {
            for _ in 0..count {
                lines.push(CheckoutLine::new(LineId(lines.len()), kind));
            }
        }

        Ok(Self {
            lines,
            line_capacity: None,
        })
    }

    /// Cap the load a line may reach before routing prefers other lines
    pub fn with_line_capacity(mut self, capacity: Option<usize>) -> Self {
        self.line_capacity = capacity;
        self
    }

    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&CheckoutLine> {
        self.lines.get(id.0)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut CheckoutLine> {
        self.lines
            .get_mut(id.0)
            .ok_or_else(|| SimulationError::Internal(format!("{} does not exist", id)))
    }

    /// Choose a line for `customer`, append it to that line and record the choice.
    ///
    /// Eligible lines are open lines whose kind accepts the basket. Among them
    /// the one with the smallest load wins, ties going to the lowest identifier.
    pub fn route(&mut self, customer: &mut Customer) -> Result<RoutingDecision> {
        let items = customer.items();
        let loads: Vec<LineLoad> = self
            .lines
            .iter()
            .map(|line| LineLoad {
                line: line.id(),
                load: line.load(),
                eligible: line.is_open() && line.accepts(items),
            })
            .collect();

        let capacity = self.line_capacity;
        let eligible = || loads.iter().filter(|entry| entry.eligible);
        let under_capacity = eligible()
            .filter(|entry| capacity.map_or(true, |cap| entry.load < cap))
            .min_by_key(|entry| (entry.load, entry.line));

        let (chosen, capacity_fallback) = match under_capacity {
            Some(entry) => (entry.line, false),
            None => {
                let entry = eligible()
                    .min_by_key(|entry| (entry.load, entry.line))
                    .ok_or(SimulationError::NoEligibleLine {
                        customer: customer.id(),
                        items,
                    })?;
                warn!(
                    "All eligible lines at capacity; {} joins {} anyway",
                    customer.id(),
                    entry.line
                );
                (entry.line, true)
            }
        };

        if !customer.assign_line(chosen) {
            return Err(SimulationError::Internal(format!(
                "{} routed twice",
                customer.id()
            )));
        }
        self.line_mut(chosen)?.enqueue(customer.id());
        debug!("{} ({} items) -> {}", customer.id(), items, chosen);

        Ok(RoutingDecision {
            chosen,
            loads,
            capacity_fallback,
        })
    }

    /// Start serving the head of `line` if its server is free.
    ///
    /// Returns the customer that began service and its completion timestamp.
    pub fn start_next_service(
        &mut self,
        line: LineId,
        customers: &mut [Customer],
        now: SimTime,
    ) -> Result<Option<(CustomerId, SimTime)>> {
        let checkout = self.line_mut(line)?;
        let head = match checkout.waiting().next() {
            Some(head) if checkout.is_idle() => head,
            _ => return Ok(None),
        };
        let customer = customers
            .get_mut(head.index())
            .ok_or_else(|| SimulationError::Internal(format!("{} is unknown", head)))?;

        match checkout.begin_service(customer, now)? {
            Some(duration) => Ok(Some((head, now + duration))),
            None => Ok(None),
        }
    }

    /// Finish the service in progress at `line` for `customer`
    pub fn complete_service(
        &mut self,
        line: LineId,
        customer: &mut Customer,
        now: SimTime,
    ) -> Result<()> {
        self.line_mut(line)?.complete_service(customer, now)
    }

    pub fn close_line(&mut self, line: LineId) -> Result<()> {
        self.line_mut(line)?.close();
        Ok(())
    }

    pub fn record_queue_sample(&mut self, line: LineId, now: SimTime) -> Result<()> {
        self.line_mut(line)?.record_queue_sample(now);
        Ok(())
    }

    /// Close out every line's queue accumulator at the end of the run
    pub fn record_all_queue_samples(&mut self, now: SimTime) {
        for line in &mut self.lines {
            line.record_queue_sample(now);
        }
    }
}
