use dynmatch_core::{AgentId, MarketStatus, ParseKindError};
use thiserror::Error;

/// Domain-level errors for market construction and simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid state for {operation}: expected {expected}, found {actual}")]
    InvalidState {
        operation: &'static str,
        expected: MarketStatus,
        actual: MarketStatus,
    },

    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),
}

impl MarketError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        MarketError::Configuration(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, MarketError::Configuration(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, MarketError::InvalidState { .. })
    }
}

impl From<ParseKindError> for MarketError {
    fn from(err: ParseKindError) -> Self {
        MarketError::Configuration(err.to_string())
    }
}

pub type MarketResult<T> = std::result::Result<T, MarketError>;
