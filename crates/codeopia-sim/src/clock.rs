/// Logical simulation time. Starts at zero and never moves backwards.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward to `time`. Earlier times are ignored.
    pub fn advance_to(&mut self, time: f64) -> f64 {
        if time > self.now {
            self.now = time;
        }
        self.now
    }

    /// Whether `time` is not in the past.
    pub fn accepts(&self, time: f64) -> bool {
        time >= self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new();
        assert_eq!(clock.now(), 0.0);
        assert!(clock.accepts(0.0));
    }

    #[test]
    fn clock_ignores_backwards_moves() {
        let mut clock = SimClock::new();
        clock.advance_to(10.0);
        assert_eq!(clock.advance_to(4.0), 10.0);
        assert!(!clock.accepts(9.5));
    }

    proptest! {
        #[test]
        fn clock_is_monotonic(times in prop::collection::vec(0.0f64..1e6, 0..50)) {
            let mut clock = SimClock::new();
            let mut last = clock.now();
            for t in times {
                let now = clock.advance_to(t);
                prop_assert!(now >= last);
                last = now;
            }
        }
    }
}
