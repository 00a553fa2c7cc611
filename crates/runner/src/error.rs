use market_sim::MarketError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Replication task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
