//! Seeded customer arrival process
//!
//! Each process owns its own `StdRng`, so independent runs never share
//! random state. For every customer the item count is drawn first, then the
//! exponential gap to the next customer. The first customer arrives at time 0.

use super::errors::{Result, SimulationError};
use super::types::SimTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp, Uniform};
use serde::{Deserialize, Serialize};

/// A customer that will arrive at `time` carrying `items` items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    pub time: SimTime,
    pub items: u32,
}

impl Arrival {
    pub fn new(time: SimTime, items: u32) -> Self {
        Self { time, items }
    }
}

/// Generator of arrivals with exponential inter-arrival times and uniform basket sizes
#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    num_customers: usize,
    // None when the mean gap is zero: everybody arrives at once
    inter_arrival: Option<Exp<f64>>,
    items: Uniform<u32>,
    rng: StdRng,
}

impl ArrivalProcess {
    pub fn new(
        num_customers: usize,
        mean_inter_arrival: f64,
        min_items: u32,
        max_items: u32,
        seed: u64,
    ) -> Result<Self> {
        if !mean_inter_arrival.is_finite() || mean_inter_arrival < 0.0 {
            return Err(SimulationError::Configuration(format!(
                "mean inter-arrival time must be finite and non-negative, got {}",
                mean_inter_arrival
            )));
        }
        if min_items < 1 {
            return Err(SimulationError::Configuration(
                "minimum item count must be at least 1".to_string(),
            ));
        }
        if min_items > max_items {
            return Err(SimulationError::Configuration(format!(
                "minimum item count {} exceeds maximum {}",
                min_items, max_items
            )));
        }

        let inter_arrival = if mean_inter_arrival > 0.0 {
            let exp = Exp::new(1.0 / mean_inter_arrival).map_err(|err| {
                SimulationError::Configuration(format!("inter-arrival distribution: {}", err))
            })?;
            Some(exp)
        } else {
            None
        };

        Ok(Self {
            num_customers,
            inter_arrival,
            items: Uniform::new_inclusive(min_items, max_items),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    /// Draw the full arrival sequence. Timestamps are non-decreasing.
    pub fn generate(mut self) -> Vec<Arrival> {
        let mut arrivals = Vec::with_capacity(self.num_customers);
        let mut clock: SimTime = 0.0;

        for index in 0..self.num_customers {
            let items = self.items.sample(&mut self.rng);
            arrivals.push(Arrival::new(clock, items));

            if index + 1 < self.num_customers {
                if let Some(exp) = &self.inter_arrival {
                    clock += exp.sample(&mut self.rng);
                }
            }
        }

        arrivals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let first = ArrivalProcess::new(25, 4.0, 1, 20, 42).unwrap().generate();
        let second = ArrivalProcess::new(25, 4.0, 1, 20, 42).unwrap().generate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_differs() {
        let first = ArrivalProcess::new(25, 4.0, 1, 20, 1).unwrap().generate();
        let second = ArrivalProcess::new(25, 4.0, 1, 20, 2).unwrap().generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_timestamps_and_items_in_range() {
        let arrivals = ArrivalProcess::new(200, 3.0, 2, 9, 7).unwrap().generate();
        assert_eq!(arrivals.len(), 200);
        assert_eq!(arrivals[0].time, 0.0);
        for pair in arrivals.windows(2) {
            assert!(pair[1].time >= pair[0].time);
        }
        assert!(arrivals.iter().all(|a| (2..=9).contains(&a.items)));
    }

    #[test]
    fn test_zero_mean_arrives_together() {
        let arrivals = ArrivalProcess::new(5, 0.0, 1, 1, 0).unwrap().generate();
        assert!(arrivals.iter().all(|a| a.time == 0.0 && a.items == 1));
    }

    #[test]
    fn test_zero_customers() {
        let arrivals = ArrivalProcess::new(0, 5.0, 1, 20, 42).unwrap().generate();
        assert!(arrivals.is_empty());
    }

    #[test]
    fn test_rejects_inverted_item_bounds() {
        let err = ArrivalProcess::new(10, 5.0, 8, 3, 42).unwrap_err();
        assert!(matches!(err, SimulationError::Configuration(_)));
    }

    #[test]
    fn test_rejects_zero_minimum_items() {
        assert!(ArrivalProcess::new(10, 5.0, 0, 3, 42).is_err());
    }

    #[test]
    fn test_rejects_negative_mean() {
        assert!(ArrivalProcess::new(10, -1.0, 1, 3, 42).is_err());
        assert!(ArrivalProcess::new(10, f64::NAN, 1, 3, 42).is_err());
    }
}
