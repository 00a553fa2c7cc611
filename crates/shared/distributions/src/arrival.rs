use std::collections::VecDeque;

use dynmatch_core::Time;
use dynmatch_ports::{ArrivalProcess, MarketError, MarketResult};
use rand::RngCore;
use rand_distr::{Distribution, Exp};

/// Buffer size used when `prepare` was never called
const DEFAULT_BATCH: usize = 1024;
/// Upper bound on a single pre-sampled batch
const MAX_BATCH: usize = 1 << 20;

/// Number of samples covering `multiple * horizon * rate`, clamped to [1, MAX_BATCH]
fn batch_len(multiple: f64, horizon: Time, rate: f64) -> usize {
    let wanted = (multiple * horizon * rate).ceil();
    if wanted.is_finite() && wanted >= 1.0 {
        (wanted as usize).min(MAX_BATCH)
    } else {
        1
    }
}

/// Poisson arrival process: exponential gaps with mean 1/rate
///
/// Gaps are drawn in batches sized from the run horizon (twice the expected
/// number of arrivals up front, one horizon's worth on each refill) and
/// consumed in order.
#[derive(Debug, Clone)]
pub struct PoissonArrivals {
    rate: f64,
    exp: Exp<f64>,
    buffer: VecDeque<Time>,
    refill_len: usize,
}

impl PoissonArrivals {
    pub fn new(rate: f64) -> MarketResult<Self> {
        let exp = Exp::new(rate).map_err(|e| {
            MarketError::configuration(format!("invalid Poisson arrival rate {rate}: {e}"))
        })?;
        Ok(Self {
            rate,
            exp,
            buffer: VecDeque::new(),
            refill_len: DEFAULT_BATCH,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Gaps sampled but not yet consumed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn fill(&mut self, len: usize, rng: &mut dyn RngCore) {
        log::debug!("Sampling {} Poisson inter-arrival gaps", len);
        self.buffer.reserve(len);
        for _ in 0..len {
            self.buffer.push_back(self.exp.sample(rng));
        }
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn prepare(&mut self, horizon: Time, rng: &mut dyn RngCore) {
        self.buffer.clear();
        self.refill_len = batch_len(1.0, horizon, self.rate);
        self.fill(batch_len(2.0, horizon, self.rate), rng);
    }

    fn next_gap(&mut self, rng: &mut dyn RngCore) -> Time {
        if self.buffer.is_empty() {
            self.fill(self.refill_len, rng);
        }
        // fill always pushes at least one sample
        self.buffer.pop_front().unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        "Poisson"
    }
}

/// Deterministic arrivals: every gap is exactly `interval`
#[derive(Debug, Clone)]
pub struct ConstantArrivals {
    pub interval: Time,
}

impl ConstantArrivals {
    pub fn new(interval: Time) -> Self {
        Self { interval }
    }

    /// Create from rate (arrivals per unit of time)
    pub fn from_rate(rate: f64) -> Self {
        if rate <= 0.0 {
            return Self {
                interval: Time::INFINITY,
            };
        }
        Self {
            interval: 1.0 / rate,
        }
    }
}

impl ArrivalProcess for ConstantArrivals {
    fn next_gap(&mut self, _rng: &mut dyn RngCore) -> Time {
        self.interval
    }

    fn name(&self) -> &str {
        "Constant"
    }
}
