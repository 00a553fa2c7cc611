use dynmatch_core::AgentId;
use dynmatch_ports::CompatibilityGraph;
use indexmap::{IndexMap, IndexSet};

/// Undirected adjacency-set graph
///
/// Neighbour lookup is O(1) and node removal is O(degree): every edge is
/// stored on both endpoints and dropped from both when a node goes.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    adjacency: IndexMap<AgentId, IndexSet<AgentId>>,
    edge_count: usize,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompatibilityGraph for AdjacencyGraph {
    fn add_node(&mut self, agent: AgentId) -> bool {
        if self.adjacency.contains_key(&agent) {
            return false;
        }
        self.adjacency.insert(agent, IndexSet::new());
        true
    }

    fn add_edge(&mut self, a: AgentId, b: AgentId) -> bool {
        if a == b || !self.adjacency.contains_key(&a) || !self.adjacency.contains_key(&b) {
            return false;
        }
        let inserted = self
            .adjacency
            .get_mut(&a)
            .is_some_and(|neighbors| neighbors.insert(b));
        if inserted {
            if let Some(neighbors) = self.adjacency.get_mut(&b) {
                neighbors.insert(a);
            }
            self.edge_count += 1;
        }
        inserted
    }

    fn remove_node(&mut self, agent: AgentId) -> bool {
        let Some(neighbors) = self.adjacency.swap_remove(&agent) else {
            return false;
        };
        for neighbor in &neighbors {
            if let Some(back) = self.adjacency.get_mut(neighbor) {
                back.swap_remove(&agent);
            }
        }
        self.edge_count -= neighbors.len();
        true
    }

    fn neighbors(&self, agent: AgentId) -> Option<Vec<AgentId>> {
        self.adjacency.get(&agent).map(|set| {
            let mut ids: Vec<AgentId> = set.iter().copied().collect();
            ids.sort_unstable();
            ids
        })
    }

    fn contains(&self, agent: AgentId) -> bool {
        self.adjacency.contains_key(&agent)
    }

    fn has_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }

    fn degree(&self, agent: AgentId) -> usize {
        self.adjacency.get(&agent).map_or(0, IndexSet::len)
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edges(&self) -> Vec<(AgentId, AgentId)> {
        let mut edges: Vec<(AgentId, AgentId)> = self
            .adjacency
            .iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |b| a < *b)
                    .map(move |b| (*a, *b))
            })
            .collect();
        edges.sort_unstable();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> AdjacencyGraph {
        let mut graph = AdjacencyGraph::new();
        for id in 0..3 {
            graph.add_node(AgentId(id));
        }
        graph.add_edge(AgentId(0), AgentId(1));
        graph.add_edge(AgentId(1), AgentId(2));
        graph.add_edge(AgentId(2), AgentId(0));
        graph
    }

    #[test]
    fn test_edges_are_undirected() {
        let graph = triangle();
        assert!(graph.has_edge(AgentId(1), AgentId(0)));
        assert!(graph.has_edge(AgentId(0), AgentId(1)));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(AgentId(2)), 2);
        assert_eq!(
            graph.edges(),
            vec![
                (AgentId(0), AgentId(1)),
                (AgentId(0), AgentId(2)),
                (AgentId(1), AgentId(2)),
            ]
        );
    }

    #[test]
    fn test_rejects_duplicates_self_loops_and_missing_nodes() {
        let mut graph = triangle();
        assert!(!graph.add_node(AgentId(0)));
        assert!(!graph.add_edge(AgentId(0), AgentId(1)));
        assert!(!graph.add_edge(AgentId(0), AgentId(0)));
        assert!(!graph.add_edge(AgentId(0), AgentId(9)));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let mut graph = triangle();
        assert!(graph.remove_node(AgentId(1)));
        assert!(!graph.remove_node(AgentId(1)));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(AgentId(0)), Some(vec![AgentId(2)]));
        assert!(!graph.has_edge(AgentId(2), AgentId(1)));
        assert_eq!(graph.neighbors(AgentId(1)), None);
    }

    #[test]
    fn test_neighbors_sorted_by_id() {
        let mut graph = AdjacencyGraph::new();
        for id in [5, 3, 9, 1] {
            graph.add_node(AgentId(id));
        }
        graph.add_edge(AgentId(5), AgentId(9));
        graph.add_edge(AgentId(5), AgentId(1));
        graph.add_edge(AgentId(5), AgentId(3));
        assert_eq!(
            graph.neighbors(AgentId(5)),
            Some(vec![AgentId(1), AgentId(3), AgentId(9)])
        );
    }
}
