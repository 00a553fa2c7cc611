use std::collections::BTreeMap;

use dynmatch_clock::SimulationClock;
use dynmatch_core::{Agent, AgentId, MarketEvent, MarketStats, MarketStatus, Probability, Time};
use dynmatch_distributions::{create_arrival_process, create_sojourn_distribution};
use dynmatch_matching::create_match_strategy;
use dynmatch_ports::{
    ArrivalProcess, Clock, CompatibilityGraph, DepartureIndex, MarketError, MarketResult,
    MatchCandidate, MatchStrategy, SojournDistribution,
};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{MarketConfig, MarketSettings, validate_horizon};
use crate::infrastructure::{AdjacencyGraph, ExitTimeIndex};

/// Market state and the primitives stepping policies are built from
///
/// Owns the clock, the live agent table, the compatibility graph, the
/// departure index and the event log. Every primitive fails with
/// [`MarketError::InvalidState`] unless the market is running.
pub struct MarketEngine {
    settings: MarketSettings,
    seed: u64,
    status: MarketStatus,
    clock: SimulationClock,

    /// Active agents
    agents: BTreeMap<AgentId, Agent>,
    /// Every agent ever created, indexed by id
    history: Vec<Agent>,
    graph: Box<dyn CompatibilityGraph>,
    departures: Box<dyn DepartureIndex>,

    arrivals: Box<dyn ArrivalProcess>,
    sojourn: Box<dyn SojournDistribution>,
    matcher: Box<dyn MatchStrategy>,
    rng: StdRng,

    events: Vec<MarketEvent>,
    matched: u64,
    failed: u64,
}

impl MarketEngine {
    pub fn new(config: &MarketConfig) -> MarketResult<Self> {
        let settings = config.validate()?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: MarketSettings) -> MarketResult<Self> {
        let arrivals = create_arrival_process(settings.arrivals, settings.m)?;
        let sojourn = create_sojourn_distribution(settings.sojourn)?;
        let matcher = create_match_strategy(settings.match_function);

        let seed = match settings.seed {
            Some(seed) => seed,
            None => StdRng::from_entropy().r#gen(),
        };
        debug!(
            "Market configured: m={} d={} p={} arrivals={} sojourn={} match={} seed={}",
            settings.m,
            settings.d,
            settings.edge_probability,
            arrivals.name(),
            sojourn.name(),
            matcher.name(),
            seed
        );

        Ok(Self {
            settings,
            seed,
            status: MarketStatus::Created,
            clock: SimulationClock::new(),
            agents: BTreeMap::new(),
            history: Vec::new(),
            graph: Box::new(AdjacencyGraph::new()),
            departures: Box::new(ExitTimeIndex::new()),
            arrivals,
            sojourn,
            matcher,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
            matched: 0,
            failed: 0,
        })
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    fn ensure_status(&self, operation: &'static str, expected: MarketStatus) -> MarketResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(MarketError::InvalidState {
                operation,
                expected,
                actual: self.status,
            })
        }
    }

    /// Fail unless the market is running
    pub fn ensure_running(&self, operation: &'static str) -> MarketResult<()> {
        self.ensure_status(operation, MarketStatus::Running)
    }

    /// `Created -> Running`: fix the horizon, prime the arrival process and
    /// announce the first arrival
    pub(crate) fn start(&mut self, horizon: Time) -> MarketResult<()> {
        self.ensure_status("run", MarketStatus::Created)?;
        validate_horizon(horizon)?;

        self.status = MarketStatus::Running;
        self.clock.start(horizon);
        self.arrivals.prepare(horizon, &mut self.rng);
        self.announce_next_arrival()?;
        Ok(())
    }

    /// `Running -> Finished`
    pub(crate) fn finish(&mut self) -> MarketResult<MarketStats> {
        self.ensure_running("finish")?;
        self.status = MarketStatus::Finished;
        Ok(self.stats())
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Add a new agent joining at `time`
    ///
    /// Draws one uniform number per active agent, in id order, and links to
    /// each one whose draw falls below the edge probability. The sojourn is
    /// drawn afterwards.
    pub fn create_agent(&mut self, time: Time) -> MarketResult<AgentId> {
        self.ensure_running("create_agent")?;

        let id = AgentId(self.history.len() as u64);
        let p = self.settings.edge_probability;
        let mut partners = Vec::new();
        for &other in self.agents.keys() {
            if self.rng.r#gen::<f64>() < p {
                partners.push(other);
            }
        }
        let sojourn = self.sojourn.sample(&mut self.rng);
        let agent = Agent::new(id, time, sojourn);

        self.graph.add_node(id);
        for partner in partners {
            self.graph.add_edge(id, partner);
        }
        self.departures.insert(agent.exit_time(), id);
        self.agents.insert(id, agent);
        self.history.push(agent);
        Ok(id)
    }

    /// Remove an active agent from the table, the graph and the departure index
    pub fn remove_agent(&mut self, id: AgentId) -> MarketResult<Agent> {
        self.ensure_running("remove_agent")?;

        let agent = self
            .agents
            .remove(&id)
            .ok_or(MarketError::AgentNotFound(id))?;
        self.departures.remove(agent.exit_time(), id);
        self.graph.remove_node(id);
        Ok(agent)
    }

    /// Choose a partner among the agent's neighbours, `None` if it has none
    pub fn find_match(&mut self, id: AgentId) -> MarketResult<Option<AgentId>> {
        self.ensure_running("find_match")?;

        let neighbors = self
            .graph
            .neighbors(id)
            .ok_or(MarketError::AgentNotFound(id))?;
        if neighbors.is_empty() {
            return Ok(None);
        }
        let candidates = neighbors
            .into_iter()
            .map(|neighbor| {
                self.agents
                    .get(&neighbor)
                    .map(|agent| MatchCandidate::new(neighbor, agent.exit_time()))
                    .ok_or(MarketError::AgentNotFound(neighbor))
            })
            .collect::<MarketResult<Vec<_>>>()?;

        Ok(self.matcher.select(&candidates, &mut self.rng))
    }

    /// Draw the gap to the next arrival and hand it to the clock
    pub fn announce_next_arrival(&mut self) -> MarketResult<Time> {
        self.ensure_running("announce_next_arrival")?;

        let gap = self.arrivals.next_gap(&mut self.rng);
        self.clock.announce(gap);
        Ok(gap)
    }

    // ------------------------------------------------------------------
    // Event recording
    // ------------------------------------------------------------------

    fn record(&mut self, event: MarketEvent) {
        trace!(
            "{} t={:.6} {}{}",
            event.kind,
            event.time,
            event.agent,
            event
                .counterpart
                .map(|c| format!(" <-> {c}"))
                .unwrap_or_default()
        );
        self.events.push(event);
    }

    /// Log an arrival
    pub fn record_join(&mut self, time: Time, agent: AgentId) -> MarketResult<()> {
        self.ensure_running("record_join")?;
        self.record(MarketEvent::join(time, agent));
        Ok(())
    }

    /// Log an unmatched departure and remove the agent
    pub fn settle_leave(&mut self, time: Time, agent: AgentId) -> MarketResult<()> {
        self.remove_agent(agent)?;
        self.record(MarketEvent::leave(time, agent));
        self.failed += 1;
        Ok(())
    }

    /// Log a match and remove both partners
    pub fn settle_match(&mut self, time: Time, agent: AgentId, partner: AgentId) -> MarketResult<()> {
        self.remove_agent(agent)?;
        self.remove_agent(partner)?;
        self.record(MarketEvent::matched(time, agent, partner));
        self.matched += 2;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Time of the next announced arrival
    pub fn next_arrival(&self) -> Time {
        self.clock.next_arrival()
    }

    /// Move the clock to the next announced arrival
    pub fn advance_clock(&mut self) -> MarketResult<Time> {
        self.ensure_running("advance_clock")?;
        Ok(self.clock.advance())
    }

    pub fn before_horizon(&self) -> bool {
        self.clock.before_horizon()
    }

    /// Earliest scheduled departure strictly before `limit`
    pub fn next_departure_before(&self, limit: Time) -> Option<(Time, AgentId)> {
        self.departures.first_before(limit)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn status(&self) -> MarketStatus {
        self.status
    }

    pub fn now(&self) -> Time {
        self.clock.now()
    }

    pub fn horizon(&self) -> Option<Time> {
        self.clock.horizon()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &MarketSettings {
        &self.settings
    }

    pub fn edge_probability(&self) -> Probability {
        self.settings.edge_probability
    }

    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Any agent created during the run, active or departed
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|index| self.history.get(index))
    }

    pub fn history(&self) -> &[Agent] {
        &self.history
    }

    pub fn is_active(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Active agents in id order
    pub fn active_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn graph(&self) -> &dyn CompatibilityGraph {
        self.graph.as_ref()
    }

    pub fn departures(&self) -> &dyn DepartureIndex {
        self.departures.as_ref()
    }

    pub fn stats(&self) -> MarketStats {
        MarketStats {
            total_agents: self.history.len() as u64,
            matched: self.matched,
            failed: self.failed,
            active: self.agents.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynmatch_core::{ArrivalDistribution, DepartureDistribution, EventKind, MatchFunction};

    fn config(d: f64) -> MarketConfig {
        MarketConfig::new(10.0, d)
            .with_arrivals(ArrivalDistribution::Constant)
            .with_departure(DepartureDistribution::Constant, [("value", 1.0)])
            .with_seed(3)
    }

    fn running(d: f64) -> MarketEngine {
        let mut engine = MarketEngine::new(&config(d)).unwrap();
        engine.start(5.0).unwrap();
        engine
    }

    #[test]
    fn test_primitives_require_running() {
        let mut engine = MarketEngine::new(&config(1.0)).unwrap();
        assert_eq!(engine.status(), MarketStatus::Created);

        let err = engine.create_agent(0.0).unwrap_err();
        assert_eq!(
            err,
            MarketError::InvalidState {
                operation: "create_agent",
                expected: MarketStatus::Running,
                actual: MarketStatus::Created,
            }
        );
        assert!(engine.announce_next_arrival().unwrap_err().is_invalid_state());
        assert!(engine.find_match(AgentId(0)).unwrap_err().is_invalid_state());
        assert!(engine.remove_agent(AgentId(0)).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_start_announces_first_arrival() {
        let engine = running(1.0);
        assert_eq!(engine.status(), MarketStatus::Running);
        assert_eq!(engine.horizon(), Some(5.0));
        assert_eq!(engine.next_arrival(), 0.1);
    }

    #[test]
    fn test_start_rejects_bad_horizon() {
        let mut engine = MarketEngine::new(&config(1.0)).unwrap();
        assert!(engine.start(0.0).unwrap_err().is_configuration());
        assert!(engine.start(f64::NAN).unwrap_err().is_configuration());
        assert_eq!(engine.status(), MarketStatus::Created);
    }

    #[test]
    fn test_full_connectivity_links_every_active_agent() {
        let mut engine = running(10.0);
        let a = engine.create_agent(0.1).unwrap();
        let b = engine.create_agent(0.2).unwrap();
        let c = engine.create_agent(0.3).unwrap();

        assert_eq!((a, b, c), (AgentId(0), AgentId(1), AgentId(2)));
        assert_eq!(engine.graph().edge_count(), 3);
        assert_eq!(engine.departures().first(), Some((0.1 + 1.0, a)));
    }

    #[test]
    fn test_zero_degree_never_links() {
        let mut engine = running(0.0);
        for i in 0..20 {
            engine.create_agent(i as f64 * 0.1).unwrap();
        }
        assert_eq!(engine.graph().edge_count(), 0);
        assert_eq!(engine.find_match(AgentId(4)).unwrap(), None);
    }

    #[test]
    fn test_remove_agent_cleans_every_index() {
        let mut engine = running(10.0);
        let a = engine.create_agent(0.1).unwrap();
        let b = engine.create_agent(0.2).unwrap();

        let removed = engine.remove_agent(a).unwrap();
        assert_eq!(removed.id, a);
        assert!(!engine.is_active(a));
        assert!(!engine.graph().contains(a));
        assert_eq!(engine.graph().degree(b), 0);
        assert_eq!(engine.departures().len(), 1);

        assert_eq!(engine.remove_agent(a), Err(MarketError::AgentNotFound(a)));
        assert_eq!(engine.find_match(a), Err(MarketError::AgentNotFound(a)));
        // History keeps departed agents
        assert_eq!(engine.agent(a).map(|agent| agent.arrival_time), Some(0.1));
    }

    #[test]
    fn test_settle_updates_counters_and_log() {
        let mut engine = running(10.0);
        let a = engine.create_agent(0.1).unwrap();
        engine.record_join(0.1, a).unwrap();
        let b = engine.create_agent(0.2).unwrap();
        engine.record_join(0.2, b).unwrap();
        let c = engine.create_agent(0.3).unwrap();
        engine.record_join(0.3, c).unwrap();

        let partner = engine.find_match(c).unwrap().unwrap();
        engine.settle_match(0.3, c, partner).unwrap();
        let remaining = engine.active_agents().next().map(|agent| agent.id).unwrap();
        engine.settle_leave(1.1, remaining).unwrap();

        let stats = engine.stats();
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.active, 0);
        assert!(stats.is_conserved());

        let kinds: Vec<EventKind> = engine.events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Join,
                EventKind::Join,
                EventKind::Join,
                EventKind::Match,
                EventKind::Leave
            ]
        );
    }

    #[test]
    fn test_first_exit_matching_prefers_earliest_departure() {
        let settings = config(10.0)
            .with_match_function(MatchFunction::FirstExit)
            .with_departure(DepartureDistribution::Uniform, [("lb", 0.5), ("ub", 3.0)])
            .validate()
            .unwrap();
        let mut engine = MarketEngine::from_settings(settings).unwrap();
        engine.start(5.0).unwrap();

        for i in 0..5 {
            engine.create_agent(i as f64 * 0.1).unwrap();
        }
        let newest = AgentId(4);
        let expected = engine
            .active_agents()
            .filter(|agent| agent.id != newest)
            .min_by(|a, b| a.exit_time().total_cmp(&b.exit_time()))
            .map(|agent| agent.id);
        assert_eq!(engine.find_match(newest).unwrap(), expected);
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let config = MarketConfig::new(10.0, 1.0);
        let engine = MarketEngine::new(&config).unwrap();
        let replay = MarketEngine::new(&config.clone().with_seed(engine.seed())).unwrap();
        assert_eq!(replay.seed(), engine.seed());
    }
}
