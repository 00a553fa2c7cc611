//! Dynmatch Runner - experiment driver for dynamic matching markets
//!
//! Runs independent replications of each stepping policy and summarises
//! the realised loss:
//!
//! - **Experiment**: JSON-described batch of runs (market, policies, horizon)
//! - **Replication**: one market run on tokio's blocking pool
//! - **Summary**: per-policy mean, spread and standard error of the loss
//!
//! ## Flow
//!
//! ```text
//!   ExperimentConfig ──► run_experiment ──► JoinSet<spawn_blocking>
//!                                               │  Market::run(horizon)
//!                                               ▼
//!                        ExperimentReport ◄── ReplicationResult (per seed)
//! ```

pub mod error;
pub mod experiment;
pub mod replication;
pub mod summary;

// Re-export main types
pub use error::{Result, RunnerError};
pub use experiment::ExperimentConfig;
pub use replication::{ReplicationResult, run_experiment, run_replication};
pub use summary::{ExperimentReport, PolicySummary};
