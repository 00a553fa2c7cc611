use std::collections::BTreeMap;

use dynmatch_core::{
    ArrivalDistribution, DepartureDistribution, MatchFunction, Probability, Time,
};
use dynmatch_distributions::SojournSpec;
use dynmatch_ports::{MarketError, MarketResult};
use serde::{Deserialize, Serialize};

/// Market configuration as supplied by callers or read from JSON
///
/// Enum fields accept snake_case names; unknown names and unknown fields are
/// rejected. Call [`MarketConfig::validate`] to obtain [`MarketSettings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Arrival rate and edge-probability denominator
    pub m: f64,
    /// Expected degree of a newly joined agent
    pub d: f64,
    pub departure_distribution: DepartureDistribution,
    pub departure_parameters: BTreeMap<String, f64>,
    pub arrival_distribution: ArrivalDistribution,
    pub match_function: MatchFunction,
    /// RNG seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            m: 1000.0,
            d: 5.0,
            departure_distribution: DepartureDistribution::Constant,
            departure_parameters: BTreeMap::new(),
            arrival_distribution: ArrivalDistribution::Poisson,
            match_function: MatchFunction::Random,
            seed: None,
        }
    }
}

impl MarketConfig {
    /// Configuration with the given scale and degree and default strategies
    pub fn new(m: f64, d: f64) -> Self {
        Self {
            m,
            d,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> MarketResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| MarketError::configuration(format!("invalid market configuration: {e}")))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_departure(
        mut self,
        distribution: DepartureDistribution,
        parameters: impl IntoIterator<Item = (&'static str, f64)>,
    ) -> Self {
        self.departure_distribution = distribution;
        self.departure_parameters = parameters
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self
    }

    pub fn with_arrivals(mut self, distribution: ArrivalDistribution) -> Self {
        self.arrival_distribution = distribution;
        self
    }

    pub fn with_match_function(mut self, function: MatchFunction) -> Self {
        self.match_function = function;
        self
    }

    /// Check every field and resolve distribution parameters
    pub fn validate(&self) -> MarketResult<MarketSettings> {
        if !(self.m.is_finite() && self.m > 0.0) {
            return Err(MarketError::configuration(format!(
                "m must be positive and finite, got {}",
                self.m
            )));
        }
        if !(self.d.is_finite() && self.d >= 0.0) {
            return Err(MarketError::configuration(format!(
                "d must be non-negative and finite, got {}",
                self.d
            )));
        }
        let sojourn =
            SojournSpec::from_parameters(self.departure_distribution, &self.departure_parameters)?;

        Ok(MarketSettings {
            m: self.m,
            d: self.d,
            edge_probability: self.d / self.m,
            sojourn,
            arrivals: self.arrival_distribution,
            match_function: self.match_function,
            seed: self.seed,
        })
    }
}

/// Validated configuration, ready to build a market from
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSettings {
    pub m: f64,
    pub d: f64,
    /// `d / m`; values at or above one connect every pair
    pub edge_probability: Probability,
    pub sojourn: SojournSpec,
    pub arrivals: ArrivalDistribution,
    pub match_function: MatchFunction,
    pub seed: Option<u64>,
}

/// Check a run horizon is usable
pub fn validate_horizon(horizon: Time) -> MarketResult<()> {
    if horizon.is_finite() && horizon > 0.0 {
        Ok(())
    } else {
        Err(MarketError::configuration(format!(
            "horizon must be positive and finite, got {horizon}"
        )))
    }
}
