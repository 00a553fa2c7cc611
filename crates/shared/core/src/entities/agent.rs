use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::Time;

/// Unique identifier for an agent
///
/// Assigned from the market's agent counter and never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Market participant
///
/// Immutable once created: the sojourn is sampled when the agent joins and
/// fixes its scheduled exit time for the rest of its life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Time the agent joined the market
    pub arrival_time: Time,
    /// How long the agent is willing to wait unmatched
    pub sojourn: Time,
    exit_time: Time,
}

impl Agent {
    pub fn new(id: AgentId, arrival_time: Time, sojourn: Time) -> Self {
        Self {
            id,
            arrival_time,
            sojourn,
            exit_time: arrival_time + sojourn,
        }
    }

    /// Scheduled departure time if the agent stays unmatched
    pub fn exit_time(&self) -> Time {
        self.exit_time
    }

    /// Returns true if the agent's patience has run out at `time`
    pub fn is_expired_at(&self, time: Time) -> bool {
        self.exit_time <= time
    }
}
