use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::event::SimEvent;

/// Time-ordered queue of pending events.
///
/// Events pop in non-decreasing time order. Events sharing a timestamp pop
/// in the order they were scheduled.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: BinaryHeap<Reverse<Queued>>,
    next_seq: u64,
}

/// Heap entry ordering an event by `(time, seq)`.
#[derive(Debug)]
struct Queued {
    seq: u64,
    event: SimEvent,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .time
            .total_cmp(&other.event.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event. O(log n).
    pub fn schedule(&mut self, event: SimEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(time = event.time, seq, kind = event.kind.label(), "event scheduled");
        self.pending.push(Reverse(Queued { seq, event }));
    }

    /// Pop the earliest event if it is due at or before `horizon`.
    pub fn pop_due(&mut self, horizon: f64) -> Option<SimEvent> {
        match self.pending.peek() {
            Some(Reverse(next)) if next.event.time <= horizon => {
                self.pending.pop().map(|Reverse(queued)| queued.event)
            }
            _ => None,
        }
    }

    /// Time of the earliest pending event.
    pub fn next_time(&self) -> Option<f64> {
        self.pending.peek().map(|Reverse(next)| next.event.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Return `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SimEventKind;
    use proptest::prelude::*;

    fn refill(time: f64, clan: &str) -> SimEvent {
        SimEvent::new(time, SimEventKind::Refill { clan: clan.into() })
    }

    fn clan_of(event: &SimEvent) -> &str {
        event.kind.clan()
    }

    #[test]
    fn pops_in_time_order() {
        let mut queue = EventQueue::new();
        queue.schedule(refill(5.0, "c"));
        queue.schedule(refill(1.0, "a"));
        queue.schedule(refill(3.0, "b"));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(10.0))
            .map(|e| e.time)
            .collect();
        assert_eq!(order, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn equal_times_pop_fifo() {
        let mut queue = EventQueue::new();
        queue.schedule(refill(2.0, "first"));
        queue.schedule(refill(2.0, "second"));
        queue.schedule(refill(1.0, "early"));
        queue.schedule(refill(2.0, "third"));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(2.0)).collect();
        let names: Vec<_> = order.iter().map(clan_of).collect();
        assert_eq!(names, vec!["early", "first", "second", "third"]);
    }

    #[test]
    fn horizon_is_inclusive() {
        let mut queue = EventQueue::new();
        queue.schedule(refill(4.0, "a"));
        queue.schedule(refill(4.5, "b"));
        assert!(queue.pop_due(3.9).is_none());
        assert_eq!(queue.pop_due(4.0).map(|e| e.time), Some(4.0));
        assert!(queue.pop_due(4.0).is_none());
        assert_eq!(queue.next_time(), Some(4.5));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn events_scheduled_while_draining_are_visible() {
        let mut queue = EventQueue::new();
        queue.schedule(refill(1.0, "a"));
        let first = queue.pop_due(10.0).unwrap();
        queue.schedule(refill(first.time + 2.0, "b"));
        assert_eq!(queue.pop_due(10.0).map(|e| e.time), Some(3.0));
        assert!(queue.is_empty());
    }

    proptest! {
        #[test]
        fn pop_order_is_sorted_and_stable(times in prop::collection::vec(0u8..20, 0..40)) {
            let mut queue = EventQueue::new();
            for (i, t) in times.iter().enumerate() {
                queue.schedule(refill(f64::from(*t), &i.to_string()));
            }
            let popped: Vec<_> = std::iter::from_fn(|| queue.pop_due(f64::MAX)).collect();
            prop_assert_eq!(popped.len(), times.len());

            let mut expected: Vec<_> = times.iter().enumerate().collect();
            expected.sort_by_key(|(_, t)| **t);
            for (event, (i, t)) in popped.iter().zip(expected) {
                prop_assert_eq!(event.time, f64::from(*t));
                prop_assert_eq!(clan_of(event), i.to_string());
            }
        }
    }
}
