//! Dynamic Matching Market Distributions
//!
//! Samplers for the two random timing axes of the market:
//!
//! - **Arrivals**: gaps between consecutive agents joining ([`PoissonArrivals`],
//!   [`ConstantArrivals`])
//! - **Sojourns**: how long each agent waits before leaving unmatched
//!   ([`ConstantSojourn`], [`ExponentialSojourn`], [`UniformSojourn`])
//!
//! All samplers draw from the RNG passed in by the market, so a run is
//! reproducible from its seed alone.

mod arrival;
mod sojourn;

pub use arrival::{ConstantArrivals, PoissonArrivals};
pub use sojourn::{ConstantSojourn, ExponentialSojourn, SojournSpec, UniformSojourn};

// Re-export the traits from ports for convenience
pub use dynmatch_ports::{ArrivalProcess, SojournDistribution};

use dynmatch_core::ArrivalDistribution;
use dynmatch_ports::{MarketError, MarketResult};

/// Factory function to create an arrival process for a market of scale `m`
pub fn create_arrival_process(
    kind: ArrivalDistribution,
    m: f64,
) -> MarketResult<Box<dyn ArrivalProcess>> {
    if !(m.is_finite() && m > 0.0) {
        return Err(MarketError::configuration(format!(
            "arrival rate m must be positive and finite, got {m}"
        )));
    }
    Ok(match kind {
        ArrivalDistribution::Poisson => Box::new(PoissonArrivals::new(m)?),
        ArrivalDistribution::Constant => Box::new(ConstantArrivals::from_rate(m)),
    })
}

/// Factory function to create a sojourn distribution from a resolved spec
pub fn create_sojourn_distribution(spec: SojournSpec) -> MarketResult<Box<dyn SojournDistribution>> {
    Ok(match spec {
        SojournSpec::Constant { value } => Box::new(ConstantSojourn::new(value)?),
        SojournSpec::Exponential { scale } => Box::new(ExponentialSojourn::new(scale)?),
        SojournSpec::Uniform { lb, ub } => Box::new(UniformSojourn::new(lb, ub)?),
    })
}
