use std::fmt;
use std::str::FromStr;

use dynmatch_core::ParseKindError;
use dynmatch_ports::MarketResult;
use serde::{Deserialize, Serialize};

use super::engine::MarketEngine;

/// One step of a market: process departures due before the next arrival,
/// advance the clock, admit the next agent
pub trait StepPolicy: Send {
    fn name(&self) -> &str;

    fn step(&mut self, engine: &mut MarketEngine) -> MarketResult<()>;
}

impl<P: StepPolicy + ?Sized> StepPolicy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn step(&mut self, engine: &mut MarketEngine) -> MarketResult<()> {
        (**self).step(engine)
    }
}

/// Defers matching to the moment an agent is about to leave
///
/// A departing agent with a neighbour is matched at its exit time; without
/// one it leaves unmatched. New arrivals only join.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatientPolicy;

impl StepPolicy for PatientPolicy {
    fn name(&self) -> &str {
        "Patient"
    }

    fn step(&mut self, engine: &mut MarketEngine) -> MarketResult<()> {
        engine.ensure_running("step")?;

        let limit = engine.next_arrival();
        while let Some((exit_time, agent)) = engine.next_departure_before(limit) {
            match engine.find_match(agent)? {
                Some(partner) => engine.settle_match(exit_time, agent, partner)?,
                None => engine.settle_leave(exit_time, agent)?,
            }
        }

        let now = engine.advance_clock()?;
        if engine.before_horizon() {
            let agent = engine.create_agent(now)?;
            engine.record_join(now, agent)?;
            engine.announce_next_arrival()?;
        }
        Ok(())
    }
}

/// Matches every arrival immediately if it can
///
/// Agents reaching their exit time leave without a rescue attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPolicy;

impl StepPolicy for GreedyPolicy {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn step(&mut self, engine: &mut MarketEngine) -> MarketResult<()> {
        engine.ensure_running("step")?;

        let limit = engine.next_arrival();
        while let Some((exit_time, agent)) = engine.next_departure_before(limit) {
            engine.settle_leave(exit_time, agent)?;
        }

        let now = engine.advance_clock()?;
        if engine.before_horizon() {
            let agent = engine.create_agent(now)?;
            engine.record_join(now, agent)?;
            if let Some(partner) = engine.find_match(agent)? {
                engine.settle_match(now, agent, partner)?;
            }
            engine.announce_next_arrival()?;
        }
        Ok(())
    }
}

/// Selectable stepping policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Greedy,
    Patient,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Greedy, PolicyKind::Patient];
}

impl FromStr for PolicyKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "patient" => Ok(Self::Patient),
            _ => Err(ParseKindError {
                kind: "policy",
                value: s.to_string(),
                expected: "greedy, patient",
            }),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("greedy"),
            Self::Patient => f.write_str("patient"),
        }
    }
}

/// Factory function to create a stepping policy
pub fn create_step_policy(kind: PolicyKind) -> Box<dyn StepPolicy> {
    match kind {
        PolicyKind::Greedy => Box::new(GreedyPolicy),
        PolicyKind::Patient => Box::new(PatientPolicy),
    }
}
