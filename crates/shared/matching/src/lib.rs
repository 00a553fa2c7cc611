//! Dynamic Matching Market Strategies
//!
//! Implementations of partner selection rules for the matching market.

mod exit_order;
mod random;

pub use exit_order::{FirstExitMatch, LastExitMatch};
pub use random::RandomMatch;

// Re-export the trait from ports for convenience
pub use dynmatch_ports::{MatchCandidate, MatchStrategy};

use dynmatch_core::MatchFunction;

/// Factory function to create a match strategy for a configured match function
pub fn create_match_strategy(function: MatchFunction) -> Box<dyn MatchStrategy> {
    match function {
        MatchFunction::Random => Box::new(RandomMatch::new()),
        MatchFunction::FirstExit => Box::new(FirstExitMatch::new()),
        MatchFunction::LastExit => Box::new(LastExitMatch::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_names() {
        assert_eq!(create_match_strategy(MatchFunction::Random).name(), "Random");
        assert_eq!(create_match_strategy(MatchFunction::FirstExit).name(), "First-Exit");
        assert_eq!(create_match_strategy(MatchFunction::LastExit).name(), "Last-Exit");
    }
}
