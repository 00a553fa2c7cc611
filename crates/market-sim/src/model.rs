// Re-export domain types from dynmatch-core so drivers only need this crate
pub use dynmatch_core::{
    Agent, AgentId, ArrivalDistribution, DepartureDistribution, EventKind, MarketEvent,
    MarketStats, MarketStatus, MatchFunction, Time,
};

// Error taxonomy and ports
pub use dynmatch_ports::{CompatibilityGraph, DepartureIndex, MarketError, MarketResult};
