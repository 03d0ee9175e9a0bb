use super::errors::{Result, SimulationError};
use super::event::{Event, EventHandle, EventKind};
use super::types::SimTime;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct ScheduledEvent {
    timestamp: SimTime,
    sequence_num: u64,
    kind: EventKind,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default).
        // Timestamps are validated finite on insert, so total_cmp agrees with numeric order.
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Time-ordered queue of pending events.
///
/// Events pop by ascending timestamp; events sharing a timestamp pop in the
/// order they were scheduled. Scheduling before the most recently popped
/// timestamp is rejected, so simulated time never moves backward.
pub struct EventQueue {
    event_queue: BinaryHeap<ScheduledEvent>,
    sequence_counter: u64,
    now: SimTime,
}

impl EventQueue {
    /// Create an empty queue positioned at time 0
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            now: 0.0,
        }
    }

    /// Schedule an event at an absolute timestamp
    pub fn schedule(&mut self, timestamp: SimTime, kind: EventKind) -> Result<EventHandle> {
        if !timestamp.is_finite() || timestamp < 0.0 || timestamp < self.now {
            return Err(SimulationError::InvalidTimestamp {
                requested: timestamp,
                now: self.now,
            });
        }

        let handle = EventHandle(self.sequence_counter);
        self.event_queue.push(ScheduledEvent {
            timestamp,
            sequence_num: self.sequence_counter,
            kind,
        });
        self.sequence_counter += 1;

        Ok(handle)
    }

    /// Remove and return the earliest event, advancing the queue's clock to it
    pub fn pop_earliest(&mut self) -> Option<Event> {
        let scheduled = self.event_queue.pop()?;
        self.now = scheduled.timestamp;
        Some(Event::new(
            scheduled.timestamp,
            EventHandle(scheduled.sequence_num),
            scheduled.kind,
        ))
    }

    /// Timestamp of the next event without removing it
    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|event| event.timestamp)
    }

    /// Check if the queue has no pending events
    pub fn is_empty(&self) -> bool {
        self.event_queue.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.event_queue.len()
    }

    /// Timestamp of the most recently popped event (0 before the first pop)
    pub fn now(&self) -> SimTime {
        self.now
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
