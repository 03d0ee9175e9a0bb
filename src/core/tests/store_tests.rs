// Tests for Store construction and routing
#[cfg(test)]
mod tests {
    use crate::core::checkout_line::LineKind;
    use crate::core::customer::Customer;
    use crate::core::errors::SimulationError;
    use crate::core::store::Store;
    use crate::core::types::{CustomerId, LineId};

    fn customer(id: u64, items: u32) -> Customer {
        Customer::new(CustomerId::new(id), 0.0, items)
    }

    #[test]
    fn test_lines_laid_out_by_kind() {
        let store = Store::new(2, 1, 2).unwrap();
        let kinds: Vec<LineKind> = store.lines().iter().map(|line| line.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Standard,
                LineKind::Standard,
                LineKind::Express,
                LineKind::SelfServe,
                LineKind::SelfServe,
            ]
        );
        for (index, line) in store.lines().iter().enumerate() {
            assert_eq!(line.id(), LineId::new(index));
        }
    }

    #[test]
    fn test_empty_store_is_a_configuration_error() {
        assert!(matches!(
            Store::new(0, 0, 0),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn test_equal_loads_pick_lowest_id() {
        let mut store = Store::new(1, 1, 1).unwrap();
        let mut first = customer(0, 3);
        let decision = store.route(&mut first).unwrap();
        assert_eq!(decision.chosen, LineId::new(0));
        assert_eq!(first.assigned_line(), Some(LineId::new(0)));
        assert!(decision.loads.iter().all(|entry| entry.load == 0));
    }

    #[test]
    fn test_shortest_line_wins() {
        let mut store = Store::new(1, 1, 1).unwrap();
        let mut customers: Vec<Customer> = (0..3).map(|id| customer(id, 2)).collect();
        let chosen: Vec<LineId> = customers
            .iter_mut()
            .map(|c| store.route(c).unwrap().chosen)
            .collect();
        // Nobody is served here, so each line's load grows by one in turn
        assert_eq!(chosen, vec![LineId::new(0), LineId::new(1), LineId::new(2)]);

        let mut fourth = customer(3, 2);
        assert_eq!(store.route(&mut fourth).unwrap().chosen, LineId::new(0));
        assert_eq!(store.line(LineId::new(0)).unwrap().load(), 2);
    }

    #[test]
    fn test_large_baskets_skip_express() {
        let mut store = Store::new(1, 1, 0).unwrap();
        let mut first = customer(0, 12);
        let mut second = customer(1, 12);
        store.route(&mut first).unwrap();
        let decision = store.route(&mut second).unwrap();

        assert_eq!(decision.chosen, LineId::new(0));
        let express = decision.loads.iter().find(|e| e.line == LineId::new(1)).unwrap();
        assert!(!express.eligible);
        assert_eq!(store.line(LineId::new(1)).unwrap().load(), 0);
    }

    #[test]
    fn test_no_eligible_line() {
        let mut store = Store::new(0, 1, 0).unwrap();
        let mut big = customer(0, 10);
        let err = store.route(&mut big).unwrap_err();
        assert_eq!(
            err,
            SimulationError::NoEligibleLine {
                customer: CustomerId::new(0),
                items: 10
            }
        );
        assert_eq!(big.assigned_line(), None);
    }

    #[test]
    fn test_closed_lines_are_skipped() {
        let mut store = Store::new(2, 0, 0).unwrap();
        store.close_line(LineId::new(0)).unwrap();
        let mut shopper = customer(0, 4);
        assert_eq!(store.route(&mut shopper).unwrap().chosen, LineId::new(1));

        store.close_line(LineId::new(1)).unwrap();
        let mut late = customer(1, 4);
        assert!(matches!(
            store.route(&mut late),
            Err(SimulationError::NoEligibleLine { .. })
        ));
    }

    #[test]
    fn test_capacity_prefers_lines_with_room() {
        let mut store = Store::new(1, 0, 1).unwrap().with_line_capacity(Some(1));
        let mut customers: Vec<Customer> = (0..3).map(|id| customer(id, 5)).collect();

        let first = store.route(&mut customers[0]).unwrap();
        let second = store.route(&mut customers[1]).unwrap();
        assert_eq!(first.chosen, LineId::new(0));
        assert_eq!(second.chosen, LineId::new(1));
        assert!(!second.capacity_fallback);

        // Every line is full now: fall back to shortest eligible
        let third = store.route(&mut customers[2]).unwrap();
        assert!(third.capacity_fallback);
        assert_eq!(third.chosen, LineId::new(0));
    }

    #[test]
    fn test_start_next_service_only_when_idle() {
        let mut store = Store::new(1, 0, 0).unwrap();
        let mut customers = vec![customer(0, 5), customer(1, 2)];
        for c in customers.iter_mut() {
            store.route(c).unwrap();
        }

        let started = store
            .start_next_service(LineId::new(0), &mut customers, 1.0)
            .unwrap();
        assert_eq!(started, Some((CustomerId::new(0), 13.0)));
        assert_eq!(customers[0].service_start(), Some(1.0));

        let busy = store
            .start_next_service(LineId::new(0), &mut customers, 1.0)
            .unwrap();
        assert_eq!(busy, None);
    }
}
