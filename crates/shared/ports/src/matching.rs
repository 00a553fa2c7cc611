use dynmatch_core::{AgentId, Time};
use rand::RngCore;

/// A compatible neighbour eligible to be chosen as partner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub agent: AgentId,
    pub exit_time: Time,
}

impl MatchCandidate {
    pub fn new(agent: AgentId, exit_time: Time) -> Self {
        Self { agent, exit_time }
    }
}

/// Port for partner selection rules
///
/// Different implementations support various selection policies:
/// - Uniformly random neighbour
/// - Earliest exit first
/// - Latest exit first
///
/// Candidates arrive in ascending id order. Implementations must be
/// deterministic given the same candidates and RNG state.
pub trait MatchStrategy: Send {
    /// Pick one candidate. Returns `None` only if `candidates` is empty
    fn select(&self, candidates: &[MatchCandidate], rng: &mut dyn RngCore) -> Option<AgentId>;

    /// Get the name of the strategy
    fn name(&self) -> &str;
}
