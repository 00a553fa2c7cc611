use serde::{Deserialize, Serialize};
use std::fmt;

/// Market lifecycle status
///
/// `Created -> Running -> Finished`. `Error` is reserved for unrecoverable
/// faults; no transition currently leads there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketStatus {
    /// Market has been configured but `run` has not been called
    Created,
    /// Simulation is in progress
    Running,
    /// Clock reached the horizon
    Finished,
    /// Unrecoverable fault (placeholder)
    Error,
}

impl MarketStatus {
    /// Returns true if the market can never run again
    pub fn is_terminal(&self) -> bool {
        matches!(self, MarketStatus::Finished | MarketStatus::Error)
    }

    /// Returns true while stepping and sampling are allowed
    pub fn is_running(&self) -> bool {
        matches!(self, MarketStatus::Running)
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarketStatus::Created => "CREATED",
            MarketStatus::Running => "RUNNING",
            MarketStatus::Finished => "FINISHED",
            MarketStatus::Error => "ERROR",
        };
        f.write_str(name)
    }
}
