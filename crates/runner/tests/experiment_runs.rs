//! Experiment integration tests
//!
//! Runs small experiments end to end through the async driver.

use approx::assert_relative_eq;
use dynmatch_runner::{ExperimentConfig, RunnerError, run_experiment};
use market_sim::{MarketConfig, PolicyKind};

fn small_experiment(replications: usize) -> ExperimentConfig {
    ExperimentConfig {
        market: MarketConfig::new(50.0, 2.0),
        horizon: 4.0,
        replications,
        base_seed: Some(100),
        max_parallel: Some(2),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_experiment_runs_every_policy() {
    let _ = env_logger::try_init();

    let report = run_experiment(&small_experiment(3)).await.unwrap();
    assert_eq!(report.summaries.len(), 2);

    for summary in &report.summaries {
        assert_eq!(summary.replications, 3);
        assert!((0.0..=1.0).contains(&summary.mean_loss));
        let seeds: Vec<u64> = summary.runs.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
        assert!(summary.runs.iter().all(|r| r.stats.is_conserved()));
    }
    assert_eq!(report.summaries[0].policy, PolicyKind::Greedy);
    assert_eq!(report.summaries[1].policy, PolicyKind::Patient);
}

#[tokio::test]
async fn test_experiment_is_reproducible() {
    let config = small_experiment(4);
    let first = run_experiment(&config).await.unwrap();
    let second = run_experiment(&ExperimentConfig {
        max_parallel: Some(1),
        ..config
    })
    .await
    .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_zero_degree_experiment_loses_everyone() {
    let config = ExperimentConfig {
        market: MarketConfig::new(50.0, 0.0),
        policies: vec![PolicyKind::Patient],
        ..small_experiment(2)
    };
    let report = run_experiment(&config).await.unwrap();
    let summary = report.summary(PolicyKind::Patient).unwrap();

    assert_relative_eq!(summary.mean_loss, 1.0);
    assert_eq!(summary.std_dev, 0.0);
    assert_eq!(summary.mean_matched, 0.0);
}

#[tokio::test]
async fn test_invalid_experiment_rejected_before_running() {
    let config = ExperimentConfig {
        horizon: 0.0,
        ..small_experiment(1)
    };
    let err = run_experiment(&config).await.unwrap_err();
    assert!(matches!(err, RunnerError::Config(_)));

    let config = ExperimentConfig {
        market: MarketConfig::new(-1.0, 2.0),
        ..small_experiment(1)
    };
    let err = run_experiment(&config).await.unwrap_err();
    assert!(matches!(err, RunnerError::Market(e) if e.is_configuration()));
}

#[tokio::test]
async fn test_experiment_from_json() {
    let config = ExperimentConfig::from_json(
        r#"{
            "market": {
                "m": 40,
                "d": 3,
                "departure_distribution": "exponential",
                "departure_parameters": {"scale": 0.5},
                "arrival_distribution": "poisson",
                "match_function": "first_exit"
            },
            "policies": ["greedy"],
            "horizon": 3,
            "replications": 2,
            "base_seed": 1
        }"#,
    )
    .unwrap();

    let report = run_experiment(&config).await.unwrap();
    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].runs.len(), 2);
}
