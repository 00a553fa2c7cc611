use std::fmt;

use market_sim::PolicyKind;
use serde::{Deserialize, Serialize};

use crate::replication::{ReplicationResult, group_by_policy};

/// Loss statistics across the replications of one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySummary {
    pub policy: PolicyKind,
    pub replications: usize,
    pub mean_loss: f64,
    /// Sample standard deviation, zero for a single run
    pub std_dev: f64,
    pub std_error: f64,
    pub mean_matched: f64,
    pub mean_failed: f64,
    pub mean_active: f64,
    pub runs: Vec<ReplicationResult>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

impl PolicySummary {
    pub fn from_runs(policy: PolicyKind, runs: Vec<ReplicationResult>) -> Self {
        let n = runs.len();
        let mean_loss = mean(runs.iter().map(|r| r.loss));
        let std_dev = if n > 1 {
            let ss: f64 = runs.iter().map(|r| (r.loss - mean_loss).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let std_error = if n > 0 { std_dev / (n as f64).sqrt() } else { 0.0 };

        Self {
            policy,
            replications: n,
            mean_loss,
            std_dev,
            std_error,
            mean_matched: mean(runs.iter().map(|r| r.stats.matched as f64)),
            mean_failed: mean(runs.iter().map(|r| r.stats.failed as f64)),
            mean_active: mean(runs.iter().map(|r| r.stats.active as f64)),
            runs,
        }
    }
}

/// Per-policy summaries of a finished experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub summaries: Vec<PolicySummary>,
}

impl ExperimentReport {
    pub fn from_results(policies: &[PolicyKind], results: Vec<ReplicationResult>) -> Self {
        Self {
            summaries: group_by_policy(policies, results),
        }
    }

    pub fn summary(&self, policy: PolicyKind) -> Option<&PolicySummary> {
        self.summaries.iter().find(|s| s.policy == policy)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>5} {:>10} {:>10} {:>10} {:>12} {:>12} {:>10}",
            "policy", "runs", "loss", "std dev", "std err", "matched", "failed", "active"
        )?;
        for s in &self.summaries {
            writeln!(
                f,
                "{:<8} {:>5} {:>10.6} {:>10.6} {:>10.6} {:>12.1} {:>12.1} {:>10.1}",
                s.policy.to_string(),
                s.replications,
                s.mean_loss,
                s.std_dev,
                s.std_error,
                s.mean_matched,
                s.mean_failed,
                s.mean_active
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dynmatch_core::MarketStats;

    fn run(replication: usize, loss: f64, failed: u64) -> ReplicationResult {
        ReplicationResult {
            policy: PolicyKind::Greedy,
            replication,
            seed: replication as u64,
            loss,
            stats: MarketStats {
                total_agents: 10,
                matched: 10 - failed,
                failed,
                active: 0,
            },
        }
    }

    #[test]
    fn test_summary_statistics() {
        let summary =
            PolicySummary::from_runs(PolicyKind::Greedy, vec![run(0, 0.2, 2), run(1, 0.4, 4)]);

        assert_eq!(summary.replications, 2);
        assert_relative_eq!(summary.mean_loss, 0.3, epsilon = 1e-12);
        assert_relative_eq!(summary.std_dev, 0.02f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(summary.std_error, 0.1, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_failed, 3.0);
        assert_relative_eq!(summary.mean_matched, 7.0);
    }

    #[test]
    fn test_single_run_has_no_spread() {
        let summary = PolicySummary::from_runs(PolicyKind::Greedy, vec![run(0, 0.25, 1)]);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.std_error, 0.0);
        assert_eq!(summary.mean_loss, 0.25);
    }

    #[test]
    fn test_report_renders_text_and_json() {
        let report = ExperimentReport::from_results(&[PolicyKind::Greedy], vec![run(0, 0.5, 5)]);
        let text = report.to_string();
        assert!(text.starts_with("policy"));
        assert!(text.contains("greedy"));

        let json = report.to_json().unwrap();
        let parsed: ExperimentReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(report.summary(PolicyKind::Patient).is_none());
    }
}
