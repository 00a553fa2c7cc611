use serde::{Deserialize, Serialize};
use std::fmt;

use super::AgentId;
use crate::values::Time;

/// Kind of entry in the market event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An agent entered the market
    Join,
    /// An agent reached its exit time without a partner
    Leave,
    /// Two agents were paired and left together
    Match,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Join => "join",
            EventKind::Leave => "leave",
            EventKind::Match => "match",
        };
        f.write_str(name)
    }
}

/// One record of the append-only event log
///
/// `counterpart` is only set for [`EventKind::Match`]; join and leave events
/// have no second party.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub kind: EventKind,
    pub time: Time,
    pub agent: AgentId,
    pub counterpart: Option<AgentId>,
}

impl MarketEvent {
    pub fn join(time: Time, agent: AgentId) -> Self {
        Self {
            kind: EventKind::Join,
            time,
            agent,
            counterpart: None,
        }
    }

    pub fn leave(time: Time, agent: AgentId) -> Self {
        Self {
            kind: EventKind::Leave,
            time,
            agent,
            counterpart: None,
        }
    }

    pub fn matched(time: Time, agent: AgentId, partner: AgentId) -> Self {
        Self {
            kind: EventKind::Match,
            time,
            agent,
            counterpart: Some(partner),
        }
    }

    /// Agents that leave the market because of this event
    pub fn departing(&self) -> impl Iterator<Item = AgentId> {
        let first = match self.kind {
            EventKind::Join => None,
            EventKind::Leave | EventKind::Match => Some(self.agent),
        };
        first.into_iter().chain(self.counterpart)
    }
}
