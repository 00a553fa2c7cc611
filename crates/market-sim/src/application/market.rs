use dynmatch_core::{Agent, AgentId, MarketEvent, MarketStats, MarketStatus, Time};
use dynmatch_ports::MarketResult;
use log::info;

use super::engine::MarketEngine;
use super::policy::{GreedyPolicy, PatientPolicy, StepPolicy};
use crate::config::MarketConfig;

/// A dynamic matching market driven by a stepping policy
///
/// Single use: `run` moves the market from `Created` to `Finished` and
/// fails on any later call.
pub struct Market<P: StepPolicy> {
    engine: MarketEngine,
    policy: P,
}

/// Market matching at forced departures
pub type PatientMarket = Market<PatientPolicy>;

/// Market matching on arrival
pub type GreedyMarket = Market<GreedyPolicy>;

impl<P: StepPolicy + Default> Market<P> {
    pub fn new(config: MarketConfig) -> MarketResult<Self> {
        Self::with_policy(config, P::default())
    }
}

impl<P: StepPolicy> Market<P> {
    pub fn with_policy(config: MarketConfig, policy: P) -> MarketResult<Self> {
        Ok(Self {
            engine: MarketEngine::new(&config)?,
            policy,
        })
    }

    /// Simulate until `horizon` and return the loss
    pub fn run(&mut self, horizon: Time) -> MarketResult<f64> {
        self.run_with_hook(horizon, |_| {})
    }

    /// Like [`Market::run`], calling `hook` after every step
    pub fn run_with_hook<F>(&mut self, horizon: Time, mut hook: F) -> MarketResult<f64>
    where
        F: FnMut(&MarketEngine),
    {
        self.engine.start(horizon)?;
        info!(
            "{} market running until t={} (seed {})",
            self.policy.name(),
            horizon,
            self.engine.seed()
        );

        while self.engine.before_horizon() {
            self.policy.step(&mut self.engine)?;
            hook(&self.engine);
        }

        let stats = self.engine.finish()?;
        info!(
            "{} market finished: {} agents, {} matched, {} failed, {} active, loss {:.4}",
            self.policy.name(),
            stats.total_agents,
            stats.matched,
            stats.failed,
            stats.active,
            stats.loss()
        );
        Ok(stats.loss())
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn engine(&self) -> &MarketEngine {
        &self.engine
    }

    /// Direct access to the primitives, for custom drivers
    pub fn engine_mut(&mut self) -> &mut MarketEngine {
        &mut self.engine
    }

    pub fn status(&self) -> MarketStatus {
        self.engine.status()
    }

    pub fn events(&self) -> &[MarketEvent] {
        self.engine.events()
    }

    pub fn stats(&self) -> MarketStats {
        self.engine.stats()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.engine.agent(id)
    }

    pub fn seed(&self) -> u64 {
        self.engine.seed()
    }

    pub fn now(&self) -> Time {
        self.engine.now()
    }
}
