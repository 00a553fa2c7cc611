use std::cmp::Ordering;
use std::collections::BTreeSet;

use dynmatch_core::{AgentId, Time};
use dynmatch_ports::DepartureIndex;

/// Composite ordering key: exit time first, then agent id
///
/// Times compare with `total_cmp`, so equal exit times never collide and
/// are visited in creation order.
#[derive(Debug, Clone, Copy)]
struct ExitKey {
    time: Time,
    agent: AgentId,
}

impl Ord for ExitKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.agent.cmp(&other.agent))
    }
}

impl PartialOrd for ExitKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ExitKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExitKey {}

/// Sorted index of scheduled departures backed by a `BTreeSet`
#[derive(Debug, Clone, Default)]
pub struct ExitTimeIndex {
    entries: BTreeSet<ExitKey>,
}

impl ExitTimeIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DepartureIndex for ExitTimeIndex {
    fn insert(&mut self, exit_time: Time, agent: AgentId) -> bool {
        self.entries.insert(ExitKey {
            time: exit_time,
            agent,
        })
    }

    fn remove(&mut self, exit_time: Time, agent: AgentId) -> bool {
        self.entries.remove(&ExitKey {
            time: exit_time,
            agent,
        })
    }

    fn first(&self) -> Option<(Time, AgentId)> {
        self.entries.first().map(|key| (key.time, key.agent))
    }

    fn entries(&self) -> Vec<(Time, AgentId)> {
        self.entries.iter().map(|key| (key.time, key.agent)).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
