//! Replications - independent market runs executed on the blocking pool

use std::collections::BTreeMap;

use dynmatch_core::MarketStats;
use log::{debug, info};
use market_sim::{Market, MarketConfig, MarketResult, PolicyKind, create_step_policy};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::error::Result;
use crate::experiment::ExperimentConfig;
use crate::summary::{ExperimentReport, PolicySummary};

/// Outcome of one market run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationResult {
    pub policy: PolicyKind,
    pub replication: usize,
    /// Seed actually used, including entropy-drawn ones
    pub seed: u64,
    pub loss: f64,
    pub stats: MarketStats,
}

/// Run one market to completion on the current thread
pub fn run_replication(
    policy: PolicyKind,
    replication: usize,
    mut config: MarketConfig,
    seed: Option<u64>,
    horizon: f64,
) -> MarketResult<ReplicationResult> {
    config.seed = seed;
    let mut market = Market::with_policy(config, create_step_policy(policy))?;
    let loss = market.run(horizon)?;

    Ok(ReplicationResult {
        policy,
        replication,
        seed: market.seed(),
        loss,
        stats: market.stats(),
    })
}

/// Run every policy and replication of an experiment
///
/// Markets run concurrently on tokio's blocking pool, at most
/// `config.parallelism()` at a time. Results are ordered by policy then
/// replication index regardless of completion order.
pub async fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;
    let limit = config.parallelism();
    info!(
        "Running {} replication(s) of {} polic(ies), horizon {}, up to {} in parallel",
        config.replications,
        config.policies.len(),
        config.horizon,
        limit
    );

    let mut tasks = JoinSet::new();
    let mut results = Vec::with_capacity(config.policies.len() * config.replications);

    for &policy in &config.policies {
        for replication in 0..config.replications {
            if tasks.len() >= limit {
                if let Some(joined) = tasks.join_next().await {
                    results.push(joined??);
                }
            }

            let market = config.market.clone();
            let seed = config.seed_for(replication);
            let horizon = config.horizon;
            debug!("Spawning {policy} replication {replication} (seed {seed:?})");
            tasks.spawn_blocking(move || {
                run_replication(policy, replication, market, seed, horizon)
            });
        }
    }
    while let Some(joined) = tasks.join_next().await {
        results.push(joined??);
    }

    Ok(ExperimentReport::from_results(&config.policies, results))
}

/// Group results by policy, keeping replication order
pub(crate) fn group_by_policy(
    policies: &[PolicyKind],
    mut results: Vec<ReplicationResult>,
) -> Vec<PolicySummary> {
    results.sort_by_key(|r| r.replication);
    let mut grouped: BTreeMap<usize, Vec<ReplicationResult>> = BTreeMap::new();
    for result in results {
        if let Some(slot) = policies.iter().position(|p| *p == result.policy) {
            grouped.entry(slot).or_default().push(result);
        }
    }
    grouped
        .into_iter()
        .map(|(slot, runs)| PolicySummary::from_runs(policies[slot], runs))
        .collect()
}
