//! Simulated time.
//!
//! Timestamps are logical clock values used only to order arrivals and
//! accesses. They never correspond to wall-clock time.

/// A point on the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Creates a new timestamp with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value of the timestamp.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A monotonically increasing logical clock starting at 1.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now: u64,
}

impl SimulatedClock {
    /// Creates a clock positioned at time 1.
    pub fn new() -> Self {
        Self { now: 1 }
    }

    /// Returns the current time without advancing.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.now)
    }

    /// Moves the clock forward by one tick.
    pub fn advance(&mut self) {
        self.now += 1;
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}
