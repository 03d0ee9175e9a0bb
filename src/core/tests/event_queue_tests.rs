// Tests for EventQueue ordering and timestamp validation
#[cfg(test)]
mod tests {
    use crate::core::errors::SimulationError;
    use crate::core::event::EventKind;
    use crate::core::event_queue::EventQueue;
    use crate::core::types::{CustomerId, LineId};

    fn arrival(items: u32) -> EventKind {
        EventKind::Arrival { items }
    }

    #[test]
    fn test_pops_in_time_order() {
        let mut queue = EventQueue::new();
        queue.schedule(10.0, arrival(1)).unwrap();
        queue.schedule(5.0, arrival(2)).unwrap();
        queue.schedule(20.0, arrival(3)).unwrap();

        let times: Vec<f64> = std::iter::from_fn(|| queue.pop_earliest())
            .map(|event| event.timestamp)
            .collect();
        assert_eq!(times, vec![5.0, 10.0, 20.0]);
        assert!(queue.is_empty());
        assert_eq!(queue.now(), 20.0);
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut queue = EventQueue::new();
        for items in 1..=6 {
            queue.schedule(3.0, arrival(items)).unwrap();
        }
        queue.schedule(1.0, arrival(99)).unwrap();

        let order: Vec<u32> = std::iter::from_fn(|| queue.pop_earliest())
            .map(|event| match event.kind {
                EventKind::Arrival { items } => items,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(order, vec![99, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_handles_are_sequence_numbers() {
        let mut queue = EventQueue::new();
        let first = queue.schedule(2.0, arrival(1)).unwrap();
        let second = queue.schedule(1.0, arrival(1)).unwrap();
        assert_eq!(first.sequence(), 0);
        assert_eq!(second.sequence(), 1);

        let popped = queue.pop_earliest().unwrap();
        assert_eq!(popped.handle, second);
    }

    #[test]
    fn test_same_schedule_same_pop_order() {
        let times = [4.0, 1.5, 4.0, 0.0, 1.5, 9.25, 4.0, 0.0];
        let run = || {
            let mut queue = EventQueue::new();
            for time in times {
                queue.schedule(time, arrival(1)).unwrap();
            }
            std::iter::from_fn(|| queue.pop_earliest())
                .map(|event| (event.timestamp, event.handle.sequence()))
                .collect::<Vec<_>>()
        };

        let first = run();
        assert_eq!(first, run());
        for pair in first.windows(2) {
            assert!(pair[0].0 < pair[1].0 || (pair[0].0 == pair[1].0 && pair[0].1 < pair[1].1));
        }
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let mut queue = EventQueue::new();
        assert!(matches!(
            queue.schedule(-1.0, arrival(1)),
            Err(SimulationError::InvalidTimestamp { .. })
        ));
        assert!(queue.schedule(f64::NAN, arrival(1)).is_err());
        assert!(queue.schedule(f64::INFINITY, arrival(1)).is_err());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rejects_scheduling_into_the_past() {
        let mut queue = EventQueue::new();
        queue.schedule(5.0, arrival(1)).unwrap();
        queue.pop_earliest().unwrap();

        let err = queue.schedule(4.0, arrival(1)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidTimestamp {
                requested: 4.0,
                now: 5.0
            }
        );

        // The current instant is still allowed
        let completion = EventKind::ServiceCompletion {
            line: LineId::new(0),
            customer: CustomerId::new(0),
        };
        assert!(queue.schedule(5.0, completion).is_ok());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_no_event_popped_twice() {
        let mut queue = EventQueue::new();
        for i in 0..50 {
            queue.schedule(f64::from(i % 7), arrival(1)).unwrap();
        }
        let mut seen = std::collections::HashSet::new();
        while let Some(event) = queue.pop_earliest() {
            assert!(seen.insert(event.handle));
        }
        assert_eq!(seen.len(), 50);
        assert_eq!(queue.peek_next_time(), None);
    }
}
