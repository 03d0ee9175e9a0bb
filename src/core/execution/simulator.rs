use crate::core::arrivals::{Arrival, ArrivalProcess};
use crate::core::customer::Customer;
use crate::core::errors::{Result, SimulationError};
use crate::core::event::{Event, EventKind};
use crate::core::event_queue::EventQueue;
use crate::core::execution::config::SimulationConfig;
use crate::core::statistics::{SimulationReport, StatisticsCollector};
use crate::core::store::{RoutingDecision, Store};
use crate::core::types::{CustomerId, LineId, SimTime};
use log::{debug, info, warn};

/// Observer trait for simulation events
///
/// All methods default to doing nothing so observers only implement what they watch.
pub trait SimulationObserver {
    /// Called when simulated time moves forward
    fn on_time_advance(&mut self, _old_time: SimTime, _new_time: SimTime) {}

    /// Called after a customer has been routed, with the loads seen before assignment
    fn on_customer_routed(&mut self, _now: SimTime, _customer: &Customer, _decision: &RoutingDecision) {}

    /// Called after an event has been fully handled
    fn on_event_processed(&mut self, _event: &Event) {}
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Events remain to be processed
    Running,
    /// Every customer finished service
    Drained,
    /// A cutoff stopped the run with events still pending
    Truncated,
}

/// Which limit stopped a truncated run
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cutoff {
    EventLimit(u64),
    TimeLimit { max_time: SimTime, next: SimTime },
}

impl std::fmt::Display for Cutoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cutoff::EventLimit(max) => write!(f, "reached {} processed events", max),
            Cutoff::TimeLimit { max_time, next } => {
                write!(f, "next event at {} is past {}", next, max_time)
            }
        }
    }
}

/// Drives one checkout simulation from the first arrival until the last customer leaves
pub struct Simulator {
    queue: EventQueue,
    store: Store,
    customers: Vec<Customer>,
    arrivals_scheduled: usize,
    completed: usize,
    events_processed: u64,
    max_events: Option<u64>,
    max_time: Option<SimTime>,
    state: RunState,
    cutoff: Option<Cutoff>,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl Simulator {
    /// Create a simulator whose customers come from the seeded arrival process
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let arrivals = ArrivalProcess::new(
            config.num_customers,
            config.mean_inter_arrival,
            config.min_items,
            config.max_items,
            config.seed,
        )?
        .generate();
        Self::with_arrivals(config, arrivals)
    }

    /// Create a simulator for an explicit list of arrivals.
    ///
    /// The store layout, capacity, closures and cutoffs come from `config`; its
    /// traffic parameters are ignored. Arrivals sharing a timestamp are handled
    /// in list order.
    pub fn with_arrivals(config: &SimulationConfig, arrivals: Vec<Arrival>) -> Result<Self> {
        config.validate()?;
        let store = Store::new(
            config.standard_lines,
            config.express_lines,
            config.self_serve_lines,
        )?
        .with_line_capacity(config.line_capacity);

        let mut queue = EventQueue::new();
        for arrival in &arrivals {
            if arrival.items < 1 {
                return Err(SimulationError::Configuration(format!(
                    "arrival at {} has no items",
                    arrival.time
                )));
            }
            if !arrival.time.is_finite() || arrival.time < 0.0 {
                return Err(SimulationError::Configuration(format!(
                    "arrival time must be finite and non-negative, got {}",
                    arrival.time
                )));
            }
            queue.schedule(arrival.time, EventKind::Arrival { items: arrival.items })?;
        }
        for closure in &config.line_closures {
            queue.schedule(closure.at, EventKind::LineClosure { line: closure.line })?;
        }

        Ok(Self {
            queue,
            store,
            customers: Vec::with_capacity(arrivals.len()),
            arrivals_scheduled: arrivals.len(),
            completed: 0,
            events_processed: 0,
            max_events: config.max_events,
            max_time: config.max_time,
            state: RunState::Running,
            cutoff: None,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Run until every customer is served or a cutoff fires, then build the report
    ///
    /// Line closures still pending once the last customer has left are
    /// dropped, so they do not stretch the run's end time.
    pub fn run(&mut self) -> Result<SimulationReport> {
        info!(
            "Starting checkout simulation: {} arrivals, {} lines",
            self.arrivals_scheduled,
            self.store.line_count()
        );

        while self.state == RunState::Running {
            if self.all_customers_served() {
                if self.has_pending_events() {
                    debug!("Dropping {} pending line closures", self.queue.len());
                }
                self.state = RunState::Drained;
                break;
            }
            if let Some(cutoff) = self.cutoff_reason() {
                warn!("Stopping run early at t={}: {}", self.current_time(), cutoff);
                self.cutoff = Some(cutoff);
                self.state = RunState::Truncated;
                break;
            }
            if !self.step()? {
                self.state = RunState::Drained;
            }
        }

        self.finish()
    }

    fn all_customers_served(&self) -> bool {
        self.customers.len() == self.arrivals_scheduled && self.completed == self.arrivals_scheduled
    }

    fn cutoff_reason(&self) -> Option<Cutoff> {
        if let Some(max) = self.max_events {
            if self.events_processed >= max {
                return Some(Cutoff::EventLimit(max));
            }
        }
        if let (Some(max_time), Some(next)) = (self.max_time, self.queue.peek_next_time()) {
            if next > max_time {
                return Some(Cutoff::TimeLimit { max_time, next });
            }
        }
        None
    }

    /// Process one event, returns true if events remain
    pub fn step(&mut self) -> Result<bool> {
        let old_time = self.queue.now();
        let event = match self.queue.pop_earliest() {
            Some(event) => event,
            None => return Ok(false),
        };
        let now = event.timestamp;

        if now > old_time {
            for observer in &mut self.observers {
                observer.on_time_advance(old_time, now);
            }
        }

        debug!("t={} {} #{}", now, event.kind.name(), event.handle.sequence());

        match event.kind {
            EventKind::Arrival { items } => self.handle_arrival(items, now)?,
            EventKind::ServiceCompletion { line, customer } => {
                self.handle_completion(line, customer, now)?
            }
            EventKind::LineClosure { line } => {
                self.store.close_line(line)?;
                info!("{} closed at t={}", line, now);
            }
        }
        self.events_processed += 1;

        for observer in &mut self.observers {
            observer.on_event_processed(&event);
        }

        Ok(!self.queue.is_empty())
    }

    fn handle_arrival(&mut self, items: u32, now: SimTime) -> Result<()> {
        let id = CustomerId(self.customers.len() as u64);
        self.customers.push(Customer::new(id, now, items));
        let customer = &mut self.customers[id.index()];

        let decision = self.store.route(customer)?;
        for observer in &mut self.observers {
            observer.on_customer_routed(now, &self.customers[id.index()], &decision);
        }

        self.start_service_if_idle(decision.chosen, now)?;
        self.store.record_queue_sample(decision.chosen, now)
    }

    fn handle_completion(&mut self, line: LineId, customer: CustomerId, now: SimTime) -> Result<()> {
        let record = self
            .customers
            .get_mut(customer.index())
            .ok_or_else(|| SimulationError::Internal(format!("{} is unknown", customer)))?;
        self.store.complete_service(line, record, now)?;
        self.completed += 1;
        debug!("{} finished at {} (t={})", customer, line, now);

        self.start_service_if_idle(line, now)?;
        self.store.record_queue_sample(line, now)
    }

    fn start_service_if_idle(&mut self, line: LineId, now: SimTime) -> Result<()> {
        if let Some((customer, completion)) =
            self.store.start_next_service(line, &mut self.customers, now)?
        {
            self.queue
                .schedule(completion, EventKind::ServiceCompletion { line, customer })?;
            debug!("{} starts at {}, done at t={}", customer, line, completion);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<SimulationReport> {
        let truncated = self.state == RunState::Truncated;
        // Only a time cutoff covers the idle stretch up to the limit
        let end_time = match self.cutoff {
            Some(Cutoff::TimeLimit { max_time, .. }) => max_time.max(self.queue.now()),
            _ => self.queue.now(),
        };
        self.store.record_all_queue_samples(end_time);

        if !truncated {
            if self.customers.len() != self.arrivals_scheduled {
                return Err(SimulationError::Internal(format!(
                    "{} arrivals scheduled but {} customers arrived",
                    self.arrivals_scheduled,
                    self.customers.len()
                )));
            }
            if let Some(stuck) = self.customers.iter().find(|c| !c.is_complete()) {
                return Err(SimulationError::IncompleteRun {
                    customer: stuck.id(),
                });
            }
        }

        let report = StatisticsCollector::new(&self.customers, self.store.lines(), end_time)
            .finalize(self.events_processed, truncated);
        info!(
            "Simulation finished at t={}: {}/{} customers served, avg wait {:.2}",
            end_time,
            report.completed_count,
            report.total_customers,
            report.avg_wait_time()
        );
        Ok(report)
    }

    /// Timestamp of the last processed event
    pub fn current_time(&self) -> SimTime {
        self.queue.now()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn has_pending_events(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

/// Build and run one simulation from its configuration
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport> {
    Simulator::new(config)?.run()
}
