use std::path::Path;

use market_sim::{MarketConfig, PolicyKind};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// A batch of independent market runs
///
/// Every listed policy is run `replications` times on the same market
/// configuration. Replication `i` is seeded with `base_seed + i`, so the
/// policies see the same random streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub market: MarketConfig,
    pub policies: Vec<PolicyKind>,
    /// Simulated time each run lasts
    pub horizon: f64,
    pub replications: usize,
    /// Seed of the first replication; entropy when absent
    pub base_seed: Option<u64>,
    /// Upper bound on concurrently running replications
    pub max_parallel: Option<usize>,
}

impl Default for ExperimentConfig {
    /// One greedy and one patient run at `m=1000, d=5` until `t=100`
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            policies: PolicyKind::ALL.to_vec(),
            horizon: 100.0,
            replications: 1,
            base_seed: None,
            max_parallel: None,
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| RunnerError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RunnerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.policies.is_empty() {
            return Err(RunnerError::Config("at least one policy is required".into()));
        }
        for (i, policy) in self.policies.iter().enumerate() {
            if self.policies[..i].contains(policy) {
                return Err(RunnerError::Config(format!("policy {policy} listed twice")));
            }
        }
        if self.replications == 0 {
            return Err(RunnerError::Config("replications must be at least 1".into()));
        }
        if self.max_parallel == Some(0) {
            return Err(RunnerError::Config("max_parallel must be at least 1".into()));
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(RunnerError::Config(format!(
                "horizon must be positive and finite, got {}",
                self.horizon
            )));
        }
        self.market.validate()?;
        Ok(())
    }

    /// Seed for replication `index`, `None` to draw from entropy
    pub fn seed_for(&self, index: usize) -> Option<u64> {
        self.base_seed
            .map(|base| base.wrapping_add(index as u64))
    }

    /// Concurrency limit, defaulting to the available cores
    pub fn parallelism(&self) -> usize {
        self.max_parallel.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
