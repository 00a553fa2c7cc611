use dynmatch_core::AgentId;

/// Port for the dynamic compatibility graph over active agents
///
/// Undirected. Removing a node removes every edge touching it, so the graph
/// never references an agent that has left the market.
pub trait CompatibilityGraph: Send {
    /// Add an isolated node. Returns false if it was already present
    fn add_node(&mut self, agent: AgentId) -> bool;

    /// Add an undirected edge between two existing nodes
    ///
    /// Returns false if either endpoint is missing or the edge is a self-loop.
    fn add_edge(&mut self, a: AgentId, b: AgentId) -> bool;

    /// Remove a node and all its edges. Returns false if it was not present
    fn remove_node(&mut self, agent: AgentId) -> bool;

    /// Neighbours of a node in ascending id order, `None` if the node is absent
    fn neighbors(&self, agent: AgentId) -> Option<Vec<AgentId>>;

    fn contains(&self, agent: AgentId) -> bool;

    fn has_edge(&self, a: AgentId, b: AgentId) -> bool;

    fn degree(&self, agent: AgentId) -> usize;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// All edges as `(low, high)` id pairs
    fn edges(&self) -> Vec<(AgentId, AgentId)>;
}
