//! Dynamic Matching Market Ports
//!
//! Port definitions (traits) for the matching market simulator.
//! These define the boundaries between the market engine and the
//! storage and sampling capabilities it consumes.

mod clock;
mod departures;
mod error;
mod graph;
mod matching;
mod sampling;

pub use clock::Clock;
pub use departures::DepartureIndex;
pub use error::{MarketError, MarketResult};
pub use graph::CompatibilityGraph;
pub use matching::{MatchCandidate, MatchStrategy};
pub use sampling::{ArrivalProcess, SojournDistribution};
