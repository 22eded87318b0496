/// An unweighted, undirected graph in compressed sparse row format.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    size: usize,
    offsets: Vec<u32>,
    edges: Vec<u32>,
}

impl Graph {
    /// Construct a graph from adjacency lists. Every edge must appear in both endpoint lists.
    pub fn new(num_nodes: usize, edges: &[Vec<u32>]) -> Self {
        assert!(edges.len() == num_nodes, "edges.len() must equal num_nodes");
        edges.iter().enumerate().for_each(|(i, neighbors)| {
            neighbors.iter().for_each(|&j| {
                assert!((j as usize) < num_nodes, "edges[{i}] references node {j} out of range");
                assert!(j as usize != i, "edges[{i}] contains a self-loop");
            });
        });

        Self {
            size: num_nodes,
            offsets: std::iter::once(0u32).chain(
                edges.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: edges.iter().flatten().copied().collect(),
        }
    }

    /// Construct a graph from a list of unordered pairs. Duplicate pairs are collapsed.
    pub fn from_pairs(num_nodes: usize, pairs: &[(usize, usize)]) -> Self {
        let mut lists = vec![Vec::new(); num_nodes];
        for &(i, j) in pairs {
            lists[i].push(j as u32);
            lists[j].push(i as u32);
        }
        for list in &mut lists {
            list.sort_unstable();
            list.dedup();
        }
        Self::new(num_nodes, &lists)
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.size }

    /// Get the number of undirected edges in the graph.
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() / 2 }

    /// Get the range of edges for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get the largest degree in the graph, or 0 if it has no nodes.
    pub fn max_degree(&self) -> usize {
        (0..self.size).map(|node| self.degree(node)).max().unwrap_or(0)
    }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Check whether `a` and `b` are adjacent.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges(a).any(|v| v == b)
    }

    /// Iterate over each undirected edge once, as `(i, j)` with `i < j`.
    pub fn edge_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| {
            self.edges(i).filter_map(move |j| (j > i).then_some((i, j)))
        })
    }
}
