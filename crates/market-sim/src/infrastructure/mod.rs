pub mod departures;
pub mod graph;

pub use departures::ExitTimeIndex;
pub use graph::AdjacencyGraph;
