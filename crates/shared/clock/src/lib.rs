//! Dynamic Matching Market Clock
//!
//! Discrete-event clock for the market simulation.
//!
//! ## Timeline
//!
//! ```text
//!   now            now + gap
//!    │◄──── gap ────►│
//!    │  departures   │ next arrival
//!    │  with exit <  │
//!    │  now + gap    │
//! ```
//!
//! The market announces the gap to the next arrival, processes every departure
//! scheduled inside that window, then advances the clock to the arrival.

mod simulation;

pub use simulation::SimulationClock;

// Re-export the Clock trait for convenience
pub use dynmatch_ports::Clock;
