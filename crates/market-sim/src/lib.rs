//! Dynamic matching market simulator
//!
//! Agents arrive over time into a random compatibility graph, wait for a
//! compatible partner and leave, matched or not, when their patience runs
//! out. Two stepping policies decide when matches are attempted:
//!
//! - [`GreedyMarket`]: on every arrival
//! - [`PatientMarket`]: only when an agent is about to leave
//!
//! ```no_run
//! use market_sim::{GreedyMarket, MarketConfig};
//!
//! let mut market = GreedyMarket::new(MarketConfig::new(1000.0, 5.0).with_seed(7))?;
//! let loss = market.run(100.0)?;
//! println!("loss = {loss}");
//! # Ok::<(), market_sim::MarketError>(())
//! ```

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod config;
pub mod model;

// Re-export main types for convenience
pub use application::{
    GreedyMarket, GreedyPolicy, Market, MarketEngine, PatientMarket, PatientPolicy, PolicyKind,
    StepPolicy, create_step_policy,
};
pub use config::{MarketConfig, MarketSettings};
pub use infrastructure::{AdjacencyGraph, ExitTimeIndex};
pub use model::{MarketError, MarketResult};
