//! Dynamic Matching Market Core Domain
//!
//! Pure domain types for the dynamic matching market simulator.
//! This crate contains no randomness, no I/O, and is 100% unit testable.

pub mod entities;
pub mod kinds;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Participants
    Agent,
    AgentId,
    // Event log
    EventKind,
    MarketEvent,
    // Lifecycle
    MarketStats,
    MarketStatus,
};
pub use kinds::{ArrivalDistribution, DepartureDistribution, MatchFunction, ParseKindError};
pub use values::{Probability, Time};
