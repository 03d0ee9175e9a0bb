use super::checkout_line::{CheckoutLine, LineKind};
use super::customer::{Customer, CustomerRecord};
use super::types::{LineId, SimTime};
use serde::{Deserialize, Serialize};

/// Count, mean, minimum and maximum of a set of durations
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub average: SimTime,
    pub min: SimTime,
    pub max: SimTime,
}

impl Summary {
    /// Summarise `values`; an empty input gives all zeros
    pub fn from_values(values: impl IntoIterator<Item = SimTime>) -> Self {
        let mut summary = Summary::default();
        let mut total = 0.0;
        for value in values {
            if summary.count == 0 {
                summary.min = value;
                summary.max = value;
            } else {
                summary.min = summary.min.min(value);
                summary.max = summary.max.max(value);
            }
            total += value;
            summary.count += 1;
        }
        if summary.count > 0 {
            summary.average = total / summary.count as f64;
        }
        summary
    }
}

/// Final figures for one checkout line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineReport {
    pub line_id: LineId,
    pub kind: LineKind,
    pub customers_served: u64,
    pub total_service_time: SimTime,
    /// Waiting length integrated over the run, divided by the run's duration
    pub avg_queue_length: f64,
    pub max_queue_length: usize,
}

/// Totals for all lines of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindReport {
    pub kind: LineKind,
    pub lines: usize,
    pub customers_served: u64,
    pub total_service_time: SimTime,
}

/// Everything a report consumer receives about a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Customers that arrived during the run
    pub total_customers: usize,
    /// Customers whose service finished; 0 means the run saw no traffic
    pub completed_count: usize,
    pub wait_time: Summary,
    pub total_time: Summary,
    /// Time of the last processed event, or `max_time` when a time cutoff stopped the run
    pub simulation_end_time: SimTime,
    pub events_processed: u64,
    /// A max-events or max-time cutoff stopped the run before it drained
    pub truncated: bool,
    pub lines: Vec<LineReport>,
    pub kinds: Vec<KindReport>,
    pub customers: Vec<CustomerRecord>,
}

impl SimulationReport {
    pub fn avg_wait_time(&self) -> SimTime {
        self.wait_time.average
    }

    pub fn max_wait_time(&self) -> SimTime {
        self.wait_time.max
    }

    pub fn avg_total_time(&self) -> SimTime {
        self.total_time.average
    }

    pub fn max_total_time(&self) -> SimTime {
        self.total_time.max
    }

    pub fn has_traffic(&self) -> bool {
        self.completed_count > 0
    }
}

/// Derives the report from finished customers and line accumulators
///
/// Only reads simulation state; the simulator hands it shared references once
/// the run has stopped.
pub struct StatisticsCollector<'a> {
    customers: &'a [Customer],
    lines: &'a [CheckoutLine],
    end_time: SimTime,
}

impl<'a> StatisticsCollector<'a> {
    pub fn new(customers: &'a [Customer], lines: &'a [CheckoutLine], end_time: SimTime) -> Self {
        Self {
            customers,
            lines,
            end_time,
        }
    }

    pub fn line_report(&self, line: &CheckoutLine) -> LineReport {
        let avg_queue_length = if self.end_time > 0.0 {
            line.queue_area() / self.end_time
        } else {
            0.0
        };
        LineReport {
            line_id: line.id(),
            kind: line.kind(),
            customers_served: line.customers_served(),
            total_service_time: line.total_service_time(),
            avg_queue_length,
            max_queue_length: line.max_queue_length(),
        }
    }

    fn kind_reports(&self) -> Vec<KindReport> {
        LineKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let lines: Vec<&CheckoutLine> =
                    self.lines.iter().filter(|line| line.kind() == kind).collect();
                if lines.is_empty() {
                    return None;
                }
                Some(KindReport {
                    kind,
                    lines: lines.len(),
                    customers_served: lines.iter().map(|line| line.customers_served()).sum(),
                    total_service_time: lines.iter().map(|line| line.total_service_time()).sum(),
                })
            })
            .collect()
    }

    pub fn finalize(&self, events_processed: u64, truncated: bool) -> SimulationReport {
        let records: Vec<CustomerRecord> = self
            .customers
            .iter()
            .filter_map(Customer::record)
            .collect();

        SimulationReport {
            total_customers: self.customers.len(),
            completed_count: records.len(),
            wait_time: Summary::from_values(records.iter().map(|r| r.wait_time)),
            total_time: Summary::from_values(records.iter().map(|r| r.total_time)),
            simulation_end_time: self.end_time,
            events_processed,
            truncated,
            lines: self.lines.iter().map(|line| self.line_report(line)).collect(),
            kinds: self.kind_reports(),
            customers: records,
        }
    }
}
