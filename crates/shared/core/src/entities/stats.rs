use serde::{Deserialize, Serialize};

/// Counters describing where every created agent ended up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Agents created since the start of the run
    pub total_agents: u64,
    /// Agents that left with a partner (two per match)
    pub matched: u64,
    /// Agents that left unmatched at their exit time
    pub failed: u64,
    /// Agents still waiting
    pub active: u64,
}

impl MarketStats {
    /// Agents that have left the market, matched or not
    pub fn departed(&self) -> u64 {
        self.matched + self.failed
    }

    /// Fraction of departed agents that left unmatched
    ///
    /// Agents still active have not departed and do not count. Returns 0.0
    /// when nobody has departed yet.
    pub fn loss(&self) -> f64 {
        match self.departed() {
            0 => 0.0,
            departed => self.failed as f64 / departed as f64,
        }
    }

    /// Failed agents over all agents created, counting active ones as not lost
    pub fn loss_over_created(&self) -> f64 {
        match self.total_agents {
            0 => 0.0,
            total => self.failed as f64 / total as f64,
        }
    }

    /// Every created agent is matched, failed, or still active
    pub fn is_conserved(&self) -> bool {
        self.total_agents == self.matched + self.failed + self.active
    }
}
