use dynmatch_core::Time;
use dynmatch_ports::Clock;

/// Simulated clock driven by announced inter-arrival gaps
///
/// Time only moves when [`SimulationClock::advance`] is called, which jumps to
/// the next announced arrival.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    /// Current simulated time
    now: Time,
    /// Gap to the next arrival, once announced
    next_gap: Option<Time>,
    /// End of the run, once started
    horizon: Option<Time>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time at which the run ends
    pub fn start(&mut self, horizon: Time) {
        self.horizon = Some(horizon);
    }

    pub fn horizon(&self) -> Option<Time> {
        self.horizon
    }

    /// Record the gap to the next arrival
    pub fn announce(&mut self, gap: Time) {
        debug_assert!(gap >= 0.0, "inter-arrival gap must be non-negative");
        self.next_gap = Some(gap);
    }

    /// Announced gap, zero if none has been announced yet
    pub fn next_gap(&self) -> Time {
        self.next_gap.unwrap_or(0.0)
    }

    /// Time of the next announced arrival
    pub fn next_arrival(&self) -> Time {
        self.now + self.next_gap()
    }

    /// Jump to the next announced arrival and return the new time
    pub fn advance(&mut self) -> Time {
        self.now = self.next_arrival();
        self.now
    }

    /// Returns true while the clock has not reached the horizon
    ///
    /// A clock without horizon is never before it.
    pub fn before_horizon(&self) -> bool {
        self.horizon.is_some_and(|horizon| self.now < horizon)
    }
}

impl Clock for SimulationClock {
    fn now(&self) -> Time {
        self.now
    }

    fn name(&self) -> &str {
        "SimulationClock"
    }
}
