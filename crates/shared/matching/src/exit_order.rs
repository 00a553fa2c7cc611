use std::cmp::Ordering;

use dynmatch_core::AgentId;
use dynmatch_ports::{MatchCandidate, MatchStrategy};
use rand::RngCore;

/// Compare by exit time, ties broken by ascending id
fn by_exit_then_id(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    a.exit_time
        .total_cmp(&b.exit_time)
        .then_with(|| a.agent.cmp(&b.agent))
}

/// Earliest-exit partner selection
///
/// Rescues the neighbour that would otherwise leave soonest.
/// Ties on exit time go to the lowest id.
#[derive(Debug, Default)]
pub struct FirstExitMatch;

impl FirstExitMatch {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for FirstExitMatch {
    fn name(&self) -> &str {
        "First-Exit"
    }

    fn select(&self, candidates: &[MatchCandidate], _rng: &mut dyn RngCore) -> Option<AgentId> {
        candidates.iter().min_by(|a, b| by_exit_then_id(a, b)).map(|c| c.agent)
    }
}

/// Latest-exit partner selection
///
/// Ties on exit time go to the lowest id, same as [`FirstExitMatch`].
#[derive(Debug, Default)]
pub struct LastExitMatch;

impl LastExitMatch {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for LastExitMatch {
    fn name(&self) -> &str {
        "Last-Exit"
    }

    fn select(&self, candidates: &[MatchCandidate], _rng: &mut dyn RngCore) -> Option<AgentId> {
        candidates
            .iter()
            .min_by(|a, b| {
                b.exit_time
                    .total_cmp(&a.exit_time)
                    .then_with(|| a.agent.cmp(&b.agent))
            })
            .map(|c| c.agent)
    }
}
