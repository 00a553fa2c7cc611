//! Configuration kinds
//!
//! Closed sets of arrival processes, sojourn distributions and match
//! functions. Each is resolved once, at market construction, into a concrete
//! strategy object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a configuration kind name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Normalises `First-Exit`, `first_exit` and `FIRSTEXIT` to `firstexit`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Process generating the gaps between consecutive arrivals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalDistribution {
    /// Exponential gaps with mean 1/m
    #[default]
    Poisson,
    /// Every gap is exactly 1/m
    Constant,
}

impl FromStr for ArrivalDistribution {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "poisson" => Ok(Self::Poisson),
            "constant" => Ok(Self::Constant),
            _ => Err(ParseKindError {
                kind: "arrival distribution",
                value: s.to_string(),
                expected: "poisson, constant",
            }),
        }
    }
}

impl fmt::Display for ArrivalDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poisson => f.write_str("poisson"),
            Self::Constant => f.write_str("constant"),
        }
    }
}

/// Shape of the per-agent sojourn (patience) distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureDistribution {
    /// Fixed `value`
    #[default]
    Constant,
    /// Exponential with mean `scale`
    Exponential,
    /// Uniform on `[lb, ub]`
    Uniform,
}

impl DepartureDistribution {
    /// Parameter names accepted by this distribution
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            Self::Constant => &["value"],
            Self::Exponential => &["scale"],
            Self::Uniform => &["lb", "ub"],
        }
    }
}

impl FromStr for DepartureDistribution {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "constant" => Ok(Self::Constant),
            "exponential" => Ok(Self::Exponential),
            "uniform" => Ok(Self::Uniform),
            _ => Err(ParseKindError {
                kind: "departure distribution",
                value: s.to_string(),
                expected: "constant, exponential, uniform",
            }),
        }
    }
}

impl fmt::Display for DepartureDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => f.write_str("constant"),
            Self::Exponential => f.write_str("exponential"),
            Self::Uniform => f.write_str("uniform"),
        }
    }
}

/// Rule picking one partner among an agent's compatible neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFunction {
    /// Uniformly random neighbour
    #[default]
    Random,
    /// Neighbour with the earliest scheduled exit
    #[serde(alias = "firstexit")]
    FirstExit,
    /// Neighbour with the latest scheduled exit
    #[serde(alias = "lastexit")]
    LastExit,
}

impl FromStr for MatchFunction {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "random" => Ok(Self::Random),
            "firstexit" => Ok(Self::FirstExit),
            "lastexit" => Ok(Self::LastExit),
            _ => Err(ParseKindError {
                kind: "match function",
                value: s.to_string(),
                expected: "random, first_exit, last_exit",
            }),
        }
    }
}

impl fmt::Display for MatchFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::FirstExit => f.write_str("first_exit"),
            Self::LastExit => f.write_str("last_exit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_separator_insensitive() {
        assert_eq!(
            "Poisson".parse::<ArrivalDistribution>(),
            Ok(ArrivalDistribution::Poisson)
        );
        assert_eq!(
            "EXPONENTIAL".parse::<DepartureDistribution>(),
            Ok(DepartureDistribution::Exponential)
        );
        assert_eq!("first_exit".parse::<MatchFunction>(), Ok(MatchFunction::FirstExit));
        assert_eq!("Last-Exit".parse::<MatchFunction>(), Ok(MatchFunction::LastExit));
        assert_eq!("firstexit".parse::<MatchFunction>(), Ok(MatchFunction::FirstExit));
    }

    #[test]
    fn test_parse_unknown_kind_fails() {
        let err = "weibull".parse::<DepartureDistribution>().unwrap_err();
        assert_eq!(err.kind, "departure distribution");
        assert_eq!(err.value, "weibull");
        assert!(err.to_string().contains("weibull"));

        assert!("hawkes".parse::<ArrivalDistribution>().is_err());
        assert!("best".parse::<MatchFunction>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in [
            MatchFunction::Random,
            MatchFunction::FirstExit,
            MatchFunction::LastExit,
        ] {
            assert_eq!(kind.to_string().parse::<MatchFunction>(), Ok(kind));
        }
    }

    #[test]
    fn test_serde_names_and_aliases() {
        let parsed: MatchFunction = serde_json::from_str("\"lastexit\"").unwrap();
        assert_eq!(parsed, MatchFunction::LastExit);
        assert_eq!(
            serde_json::to_string(&MatchFunction::FirstExit).unwrap(),
            "\"first_exit\""
        );
        assert!(serde_json::from_str::<DepartureDistribution>("\"weibull\"").is_err());
    }

    #[test]
    fn test_parameter_names() {
        assert_eq!(DepartureDistribution::Uniform.parameter_names(), &["lb", "ub"]);
        assert_eq!(DepartureDistribution::Constant.parameter_names(), &["value"]);
    }
}
