use std::collections::BTreeMap;

use dynmatch_core::{DepartureDistribution, Time};
use dynmatch_ports::{MarketError, MarketResult, SojournDistribution};
use rand::RngCore;
use rand::distributions::Uniform;
use rand_distr::{Distribution, Exp};

/// Sojourn distribution with its parameters resolved and defaults applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SojournSpec {
    Constant { value: Time },
    Exponential { scale: Time },
    Uniform { lb: Time, ub: Time },
}

impl SojournSpec {
    /// Resolve a distribution kind and its named parameters
    ///
    /// Missing parameters take their defaults (`value = 1`, `scale = 1`,
    /// `lb = ub = 0`); names the distribution does not know are rejected.
    pub fn from_parameters(
        kind: DepartureDistribution,
        parameters: &BTreeMap<String, f64>,
    ) -> MarketResult<Self> {
        let accepted = kind.parameter_names();
        if let Some(unknown) = parameters.keys().find(|k| !accepted.contains(&k.as_str())) {
            return Err(MarketError::configuration(format!(
                "unknown parameter '{unknown}' for {kind} departure distribution (expected: {})",
                accepted.join(", ")
            )));
        }
        let get = |name: &str, default: f64| parameters.get(name).copied().unwrap_or(default);

        let spec = match kind {
            DepartureDistribution::Constant => SojournSpec::Constant {
                value: get("value", 1.0),
            },
            DepartureDistribution::Exponential => SojournSpec::Exponential {
                scale: get("scale", 1.0),
            },
            DepartureDistribution::Uniform => SojournSpec::Uniform {
                lb: get("lb", 0.0),
                ub: get("ub", 0.0),
            },
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn kind(&self) -> DepartureDistribution {
        match self {
            SojournSpec::Constant { .. } => DepartureDistribution::Constant,
            SojournSpec::Exponential { .. } => DepartureDistribution::Exponential,
            SojournSpec::Uniform { .. } => DepartureDistribution::Uniform,
        }
    }

    /// Check the parameters describe a distribution over finite, non-negative times
    pub fn validate(&self) -> MarketResult<()> {
        match *self {
            SojournSpec::Constant { value } => {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(MarketError::configuration(format!(
                        "constant sojourn must be finite and non-negative, got {value}"
                    )));
                }
            }
            SojournSpec::Exponential { scale } => {
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(MarketError::configuration(format!(
                        "exponential sojourn scale must be positive and finite, got {scale}"
                    )));
                }
            }
            SojournSpec::Uniform { lb, ub } => {
                if !(lb.is_finite() && ub.is_finite() && 0.0 <= lb && lb <= ub) {
                    return Err(MarketError::configuration(format!(
                        "uniform sojourn needs 0 <= lb <= ub, got lb={lb} ub={ub}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Every agent waits exactly `value`
#[derive(Debug, Clone)]
pub struct ConstantSojourn {
    value: Time,
}

impl ConstantSojourn {
    pub fn new(value: Time) -> MarketResult<Self> {
        SojournSpec::Constant { value }.validate()?;
        Ok(Self { value })
    }
}

impl SojournDistribution for ConstantSojourn {
    fn sample(&self, _rng: &mut dyn RngCore) -> Time {
        self.value
    }

    fn mean(&self) -> Time {
        self.value
    }

    fn name(&self) -> &str {
        "Constant"
    }
}

/// Exponentially distributed patience with mean `scale`
#[derive(Debug, Clone)]
pub struct ExponentialSojourn {
    scale: Time,
    exp: Exp<f64>,
}

impl ExponentialSojourn {
    pub fn new(scale: Time) -> MarketResult<Self> {
        SojournSpec::Exponential { scale }.validate()?;
        let exp = Exp::new(1.0 / scale).map_err(|e| {
            MarketError::configuration(format!("invalid exponential scale {scale}: {e}"))
        })?;
        Ok(Self { scale, exp })
    }
}

impl SojournDistribution for ExponentialSojourn {
    fn sample(&self, rng: &mut dyn RngCore) -> Time {
        self.exp.sample(rng)
    }

    fn mean(&self) -> Time {
        self.scale
    }

    fn name(&self) -> &str {
        "Exponential"
    }
}

/// Patience drawn uniformly from `[lb, ub]`
///
/// `lb == ub` is allowed and always yields `lb`.
#[derive(Debug, Clone)]
pub struct UniformSojourn {
    lb: Time,
    ub: Time,
    uniform: Uniform<f64>,
}

impl UniformSojourn {
    pub fn new(lb: Time, ub: Time) -> MarketResult<Self> {
        SojournSpec::Uniform { lb, ub }.validate()?;
        Ok(Self {
            lb,
            ub,
            uniform: Uniform::new_inclusive(lb, ub),
        })
    }
}

impl SojournDistribution for UniformSojourn {
    fn sample(&self, rng: &mut dyn RngCore) -> Time {
        self.uniform.sample(rng)
    }

    fn mean(&self) -> Time {
        (self.lb + self.ub) / 2.0
    }

    fn name(&self) -> &str {
        "Uniform"
    }
}
