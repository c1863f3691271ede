/// A gold transport from a supplying mine to a target clan.
///
/// Created when a mine is chosen and carried unchanged through the arrival,
/// extraction and return events it spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Clan the gold is delivered for.
    pub target: String,
    /// Units of gold to extract.
    pub amount: i64,
    /// Gold credited to the running total when the troops return.
    pub payoff: f64,
    /// Mine the gold is extracted from.
    pub supplier: String,
}

/// What happens when an event fires.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    /// Troops reach the supplying mine and start extracting.
    SupplierArrival(TransportRequest),
    /// Extraction at the supplying mine is complete.
    ExtractionDone(TransportRequest),
    /// Troops are back; the payoff is credited.
    Return(TransportRequest),
    /// A mine is restored to full capacity.
    Refill {
        /// The refilled mine.
        clan: String,
    },
    /// A block window opens on a clan.
    BlockStart {
        /// The blocked clan.
        clan: String,
        /// Length of the block window.
        duration: f64,
    },
    /// A block window closes.
    BlockEnd {
        /// The unblocked clan.
        clan: String,
    },
}

impl SimEventKind {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SupplierArrival(_) => "supplier_arrival",
            Self::ExtractionDone(_) => "extraction_done",
            Self::Return(_) => "return",
            Self::Refill { .. } => "refill",
            Self::BlockStart { .. } => "block_start",
            Self::BlockEnd { .. } => "block_end",
        }
    }

    /// The clan whose state this event touches.
    pub fn clan(&self) -> &str {
        match self {
            Self::SupplierArrival(req) | Self::ExtractionDone(req) | Self::Return(req) => {
                req.supplier.as_str()
            }
            Self::Refill { clan } | Self::BlockStart { clan, .. } | Self::BlockEnd { clan } => {
                clan.as_str()
            }
        }
    }

    /// Check whether a clan is involved in this event, as supplier or target.
    pub fn involves(&self, name: &str) -> bool {
        match self {
            Self::SupplierArrival(req) | Self::ExtractionDone(req) | Self::Return(req) => {
                req.supplier == name || req.target == name
            }
            _ => self.clan() == name,
        }
    }
}

/// An event stamped with the logical time it fires at.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    /// Logical time of the event.
    pub time: f64,
    /// The specific kind of event.
    pub kind: SimEventKind,
}

impl SimEvent {
    /// Create a new event at `time`.
    pub fn new(time: f64, kind: SimEventKind) -> Self {
        Self { time, kind }
    }
}

/// Journal of dispatched events.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events, in dispatch order.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return events whose time lies in `from..=to`.
    pub fn events_between(&self, from: f64, to: f64) -> Vec<&SimEvent> {
        self.events
            .iter()
            .filter(|e| e.time >= from && e.time <= to)
            .collect()
    }

    /// Return all events involving the given clan.
    pub fn events_for_clan(&self, name: &str) -> Vec<&SimEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.involves(name))
            .collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TransportRequest {
        TransportRequest {
            target: "clan_c".into(),
            amount: 5,
            payoff: 10.0,
            supplier: "clan_a".into(),
        }
    }

    fn refill(time: f64) -> SimEvent {
        SimEvent::new(
            time,
            SimEventKind::Refill {
                clan: "clan_a".into(),
            },
        )
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(refill(1.0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_between(0.0, 1.0).len(), 1);
        assert_eq!(log.events_for_clan("clan_a").len(), 1);
        assert!(log.events_for_clan("clan_b").is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(refill(f64::from(i)));
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].time, 3.0);
        assert_eq!(log.events()[1].time, 4.0);
    }

    #[test]
    fn transport_events_involve_both_ends() {
        let kind = SimEventKind::Return(request());
        assert!(kind.involves("clan_a"));
        assert!(kind.involves("clan_c"));
        assert!(!kind.involves("clan_b"));
        assert_eq!(kind.clan(), "clan_a");

        let kind = SimEventKind::BlockStart {
            clan: "clan_b".into(),
            duration: 3.0,
        };
        assert!(kind.involves("clan_b"));
        assert!(!kind.involves("clan_a"));
        assert_eq!(kind.label(), "block_start");
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.push(refill(1.0));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn events_between_is_inclusive() {
        let mut log = EventLog::new(0);
        for t in [1.0, 2.0, 3.0, 4.0] {
            log.push(refill(t));
        }
        let times: Vec<_> = log.events_between(2.0, 3.0).iter().map(|e| e.time).collect();
        assert_eq!(times, vec![2.0, 3.0]);
    }
}
