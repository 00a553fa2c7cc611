use dynmatch_core::{AgentId, Time};

/// Port for the time-ordered index of scheduled departures
///
/// Entries are ordered by exit time; agents sharing an exit time are kept
/// side by side and ordered by id.
pub trait DepartureIndex: Send {
    /// Schedule an agent's departure. Returns false if the entry already exists
    fn insert(&mut self, exit_time: Time, agent: AgentId) -> bool;

    /// Remove a scheduled departure. Returns false if it was not present
    fn remove(&mut self, exit_time: Time, agent: AgentId) -> bool;

    /// Earliest scheduled departure
    fn first(&self) -> Option<(Time, AgentId)>;

    /// Earliest scheduled departure strictly before `limit`
    fn first_before(&self, limit: Time) -> Option<(Time, AgentId)> {
        self.first().filter(|(exit_time, _)| *exit_time < limit)
    }

    /// All entries in ascending exit-time order
    fn entries(&self) -> Vec<(Time, AgentId)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
