pub mod engine;
pub mod market;
pub mod policy;

pub use engine::MarketEngine;
pub use market::{GreedyMarket, Market, PatientMarket};
pub use policy::{GreedyPolicy, PatientPolicy, PolicyKind, StepPolicy, create_step_policy};
