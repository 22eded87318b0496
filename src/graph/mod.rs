mod adjacency;
mod graph;

pub use graph::Graph;
