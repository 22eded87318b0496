//! Strategies for assigning palette colors to polygons.

use std::{fmt, str::FromStr};

use anyhow::Result;
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{color::{Color, Palette}, common::ConfigError, graph::Graph};

/// How to choose a fill color for each polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColoringStrategy {
    /// Independent uniform choice per polygon; adjacency is ignored.
    Random,
    /// Collection-order randomized choice avoiding colors of already-colored neighbors.
    Constrained,
    /// Largest-degree-first greedy coloring with palette wraparound.
    #[default]
    Greedy,
    /// A single fixed fill for every polygon.
    None,
}

impl ColoringStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColoringStrategy::Random => "random",
            ColoringStrategy::Constrained => "constrained",
            ColoringStrategy::Greedy => "greedy",
            ColoringStrategy::None => "none",
        }
    }

    /// Whether this strategy needs the adjacency graph.
    pub fn uses_adjacency(&self) -> bool {
        matches!(self, ColoringStrategy::Constrained | ColoringStrategy::Greedy)
    }

    /// Assign a color to each of the `graph.node_count()` polygons.
    ///
    /// `Random` only looks at the node count. `None` returns `default_fill`
    /// everywhere and never touches `palette` or `rng`.
    pub fn assign(&self, graph: &Graph, palette: &Palette, default_fill: Color, rng: &mut impl Rng) -> Result<Vec<Color>> {
        let indices = match self {
            ColoringStrategy::None => return Ok(vec![default_fill; graph.node_count()]),
            _ if palette.is_empty() => {
                return Err(ConfigError::EmptyPalette { strategy: self.as_str() }.into());
            }
            ColoringStrategy::Random => random_indices(graph.node_count(), palette.len(), rng),
            ColoringStrategy::Constrained => constrained_indices(graph, palette.len(), rng),
            ColoringStrategy::Greedy => greedy_indices(graph),
        };

        Ok(indices.into_iter().map(|index| palette.wrapped(index)).collect())
    }
}

impl fmt::Display for ColoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ColoringStrategy {
    type Err = std::convert::Infallible;

    /// Unrecognized names fall back to `None`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "random" => ColoringStrategy::Random,
            "constrained" => ColoringStrategy::Constrained,
            "greedy" => ColoringStrategy::Greedy,
            "none" | "default" | "" => ColoringStrategy::None,
            other => {
                warn!("[color] unknown coloring strategy {other:?}; using a single fill");
                ColoringStrategy::None
            }
        })
    }
}

impl From<String> for ColoringStrategy {
    fn from(s: String) -> Self {
        let Ok(strategy) = s.parse::<ColoringStrategy>();
        strategy
    }
}

impl From<ColoringStrategy> for String {
    fn from(strategy: ColoringStrategy) -> Self { strategy.as_str().to_string() }
}

/// Uniform palette index per node, in node order.
fn random_indices(num_nodes: usize, num_colors: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..num_nodes).map(|_| rng.random_range(0..num_colors)).collect()
}

/// Collection-order coloring that picks uniformly among colors unused by colored neighbors,
/// falling back to the whole palette when every color is taken.
fn constrained_indices(graph: &Graph, num_colors: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut colors: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut taken = vec![false; num_colors];
    let mut fallbacks = 0;

    for node in 0..graph.node_count() {
        taken.iter_mut().for_each(|t| *t = false);
        graph.edges(node)
            .filter_map(|v| colors[v])
            .for_each(|c| taken[c] = true);

        let free = (0..num_colors).filter(|&c| !taken[c]).collect::<Vec<_>>();
        let choice = match free.choose(rng) {
            Some(&c) => c,
            None => {
                fallbacks += 1;
                rng.random_range(0..num_colors)
            }
        };
        colors[node] = Some(choice);
    }

    if fallbacks > 0 {
        warn!("[color::constrained] palette of {num_colors} exhausted at {fallbacks} node(s); neighbors may share colors");
    }

    colors.into_iter().map(|c| c.unwrap_or(0)).collect()
}

/// Largest-degree-first greedy coloring. Ties keep ascending node order.
/// Returns unbounded greedy indices; callers wrap them onto the palette.
fn greedy_indices(graph: &Graph) -> Vec<usize> {
    let mut order = (0..graph.node_count()).collect::<Vec<_>>();
    order.sort_by_key(|&node| std::cmp::Reverse(graph.degree(node))); // stable

    let mut colors: Vec<Option<usize>> = vec![None; graph.node_count()];
    for node in order {
        let mut used = graph.edges(node)
            .filter_map(|v| colors[v])
            .collect::<Vec<_>>();
        used.sort_unstable();
        used.dedup();

        // Smallest index not in the sorted, deduplicated `used` list.
        let index = used.iter()
            .enumerate()
            .find(|&(i, &c)| i != c)
            .map_or(used.len(), |(i, _)| i);
        colors[node] = Some(index);
    }

    let needed = colors.iter().flatten().max().map_or(0, |&c| c + 1);
    debug!("[color::greedy] {needed} color class(es) over {} node(s)", graph.node_count());

    colors.into_iter().map(|c| c.unwrap_or(0)).collect()
}
