use dynmatch_core::AgentId;
use dynmatch_ports::{MatchCandidate, MatchStrategy};
use rand::{Rng, RngCore};

/// Uniformly random partner selection
///
/// Draws one index from the market RNG; with candidates in id order the
/// choice is reproducible for a fixed seed.
#[derive(Debug, Default)]
pub struct RandomMatch;

impl RandomMatch {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for RandomMatch {
    fn name(&self) -> &str {
        "Random"
    }

    fn select(&self, candidates: &[MatchCandidate], rng: &mut dyn RngCore) -> Option<AgentId> {
        if candidates.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..candidates.len());
        Some(candidates[index].agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn candidates(n: u64) -> Vec<MatchCandidate> {
        (0..n)
            .map(|i| MatchCandidate::new(AgentId(i), i as f64))
            .collect()
    }

    #[test]
    fn test_empty_candidates_yield_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(RandomMatch::new().select(&[], &mut rng), None);
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let mut rng = StdRng::seed_from_u64(1);
        let only = [MatchCandidate::new(AgentId(5), 1.0)];
        assert_eq!(RandomMatch::new().select(&only, &mut rng), Some(AgentId(5)));
    }

    #[test]
    fn test_random_covers_all_candidates() {
        let mut rng = StdRng::seed_from_u64(42);
        let strategy = RandomMatch::new();
        let pool = candidates(4);

        let chosen: HashSet<AgentId> = (0..200)
            .filter_map(|_| strategy.select(&pool, &mut rng))
            .collect();
        assert_eq!(chosen.len(), 4);
    }

    #[test]
    fn test_random_deterministic_for_seed() {
        let strategy = RandomMatch::new();
        let pool = candidates(10);
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| strategy.select(&pool, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(7), picks(7));
    }
}
