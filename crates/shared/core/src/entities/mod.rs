mod agent;
mod event;
mod market_status;
mod stats;

pub use agent::{Agent, AgentId};
pub use event::{EventKind, MarketEvent};
pub use market_status::MarketStatus;
pub use stats::MarketStats;
