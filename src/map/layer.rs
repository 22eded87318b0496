use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use geo::MultiPolygon;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};

use crate::{
    color::Color,
    common::ConfigError,
    config::{BoundsConfig, ColoringConfig},
    geom::{BoundingBox, Geometries},
    graph::Graph,
    map::{ColoredNeighborhood, Neighborhood},
};

/// The neighborhoods of one city, with their geometries indexed for spatial queries.
#[derive(Debug, Clone)]
pub struct NeighborhoodLayer {
    names: Vec<String>,
    geoms: Geometries,
}

impl NeighborhoodLayer {
    /// Build a layer from neighborhoods, keeping their order.
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        let (names, shapes): (Vec<String>, Vec<MultiPolygon<f64>>) = neighborhoods.into_iter()
            .map(|n| (n.name, n.geometry))
            .unzip();
        Self { names, geoms: Geometries::new(shapes) }
    }

    /// Get the number of neighborhoods.
    #[inline] pub fn len(&self) -> usize { self.names.len() }

    /// Check if there are no neighborhoods.
    #[inline] pub fn is_empty(&self) -> bool { self.names.is_empty() }

    /// Get the neighborhood names, in collection order.
    #[inline] pub fn names(&self) -> &[String] { &self.names }

    /// Get the neighborhood geometries, in collection order.
    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { self.geoms.shapes() }

    /// Iterate over `(name, geometry)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MultiPolygon<f64>)> {
        self.names.iter().map(String::as_str).zip(self.geoms.shapes())
    }

    /// Compute the bounding box of all neighborhoods.
    pub fn bounds(&self) -> Option<BoundingBox> { self.geoms.bounds() }

    /// Compute the bounding box of all neighborhoods, then pad and adjust it per `config`.
    pub fn poster_bounds(&self, config: &BoundsConfig) -> Result<BoundingBox> {
        let raw = self.bounds()
            .ok_or_else(|| anyhow::anyhow!("[map] Could not determine bounds; layer has no geometry"))?;
        let adjusted = config.apply(&raw)?;
        info!("[map] bounds {:?} adjusted to {:?}", raw.to_tuple(), adjusted.to_tuple());
        Ok(adjusted)
    }

    /// Build the adjacency graph over all neighborhoods.
    pub fn adjacency(&self, tolerance: f64) -> Result<Graph> {
        self.geoms.adjacency_graph(tolerance)
    }

    /// Replace names found in `renames`. Returns the number of neighborhoods renamed.
    pub fn rename(&mut self, renames: &BTreeMap<String, String>) -> usize {
        let mut count = 0;
        for name in &mut self.names {
            if let Some(new_name) = renames.get(name.as_str()) {
                *name = new_name.clone();
                count += 1;
            }
        }
        count
    }

    /// Names that occur more than once, sorted.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        self.names.iter().for_each(|name| *counts.entry(name.as_str()).or_default() += 1);
        let mut duplicates = counts.into_iter()
            .filter_map(|(name, count)| (count > 1).then_some(name))
            .collect::<Vec<_>>();
        duplicates.sort_unstable();
        duplicates
    }

    /// Assign a fill color to every neighborhood per `config`, in collection order.
    pub fn assign_colors(&self, config: &ColoringConfig) -> Result<Vec<Color>> {
        if !(0.0..=1.0).contains(&config.fill_probability) {
            return Err(ConfigError::InvalidParameter {
                name: "fill_probability",
                value: config.fill_probability,
                reason: "must lie in [0, 1]",
            }.into());
        }

        let graph = if config.strategy.uses_adjacency() {
            self.adjacency(config.adjacency_tolerance)?
        } else {
            Graph::from_pairs(self.len(), &[])
        };

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut colors = config.strategy.assign(&graph, &config.palette, config.default_fill, &mut rng)?;

        if config.fill_probability < 1.0 {
            let mut skipped = 0;
            for color in &mut colors {
                if rng.random::<f64>() >= config.fill_probability {
                    *color = config.default_fill;
                    skipped += 1;
                }
            }
            info!("[map] left {skipped} of {} neighborhoods at the default fill", colors.len());
        }

        let collisions = graph.edge_pairs().filter(|&(i, j)| colors[i] == colors[j]).count();
        if collisions > 0 && config.strategy.uses_adjacency() {
            warn!("[map] {collisions} adjacent pair(s) share a color under the {} strategy", config.strategy);
        }
        info!("[map] colored {} neighborhoods with the {} strategy", colors.len(), config.strategy);

        Ok(colors)
    }

    /// Color every neighborhood per `config`, producing explicit colored records.
    pub fn color(&self, config: &ColoringConfig) -> Result<Vec<ColoredNeighborhood>> {
        let colors = self.assign_colors(config)?;
        Ok(self.iter()
            .zip(colors)
            .map(|((name, geometry), color)| ColoredNeighborhood {
                name: name.to_string(),
                geometry: geometry.clone(),
                color,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;
    use crate::color::{ColoringStrategy, Palette};

    fn square(name: &str, x: f64, y: f64) -> Neighborhood {
        Neighborhood::new(name, MultiPolygon(vec![polygon![
            (x: x, y: y), (x: x + 1.0, y: y), (x: x + 1.0, y: y + 1.0), (x: x, y: y + 1.0),
        ]]))
    }

    /// A 3x3 grid of unit squares; interior squares touch up to eight others.
    fn grid() -> NeighborhoodLayer {
        NeighborhoodLayer::new((0..9).map(|i| square(&format!("n{i}"), (i % 3) as f64, (i / 3) as f64)).collect())
    }

    #[test]
    fn rename_replaces_known_names() {
        let mut layer = NeighborhoodLayer::new(vec![square("Old", 0.0, 0.0), square("Keep", 2.0, 0.0), square("Old", 4.0, 0.0)]);
        assert_eq!(layer.duplicate_names(), vec!["Old"]);
        let renames = BTreeMap::from([("Old".to_string(), "New".to_string())]);
        assert_eq!(layer.rename(&renames), 2);
        assert_eq!(layer.names(), &["New", "Keep", "New"]);
    }

    #[test]
    fn greedy_grid_has_no_adjacent_duplicates() {
        let layer = grid();
        let config = ColoringConfig { strategy: ColoringStrategy::Greedy, ..Default::default() };
        let colors = layer.assign_colors(&config).unwrap();
        let graph = layer.adjacency(0.0).unwrap();
        assert_eq!(graph.max_degree(), 8);
        for (i, j) in graph.edge_pairs() { assert_ne!(colors[i], colors[j], "{i} {j}") }
    }

    #[test]
    fn none_strategy_uses_default_fill() {
        let layer = grid();
        let config = ColoringConfig { strategy: ColoringStrategy::None, ..Default::default() };
        let colored = layer.color(&config).unwrap();
        assert!(colored.iter().all(|n| n.color == config.default_fill));
        assert_eq!(colored[4].name, "n4");
    }

    #[test]
    fn zero_fill_probability_leaves_everything_default() {
        let layer = grid();
        let config = ColoringConfig { fill_probability: 0.0, ..Default::default() };
        let colors = layer.assign_colors(&config).unwrap();
        assert!(colors.iter().all(|&c| c == config.default_fill));
    }

    #[test]
    fn partial_fill_probability_keeps_strategy_colors() {
        let layer = grid();
        let (mut kept, mut reset) = (0, 0);
        for seed in 0..5 {
            let full = ColoringConfig { strategy: ColoringStrategy::Constrained, seed, ..Default::default() };
            let half = ColoringConfig { fill_probability: 0.5, ..full.clone() };

            let strategy_colors = layer.assign_colors(&full).unwrap();
            let colors = layer.assign_colors(&half).unwrap();
            assert_eq!(colors, layer.assign_colors(&half).unwrap(), "seed {seed}");

            // Strategy draws come first, so every kept color matches the full run.
            for (color, strategy_color) in colors.iter().zip(&strategy_colors) {
                if *color == half.default_fill { reset += 1 } else {
                    assert_eq!(color, strategy_color, "seed {seed}");
                    kept += 1;
                }
            }
        }
        assert!(kept > 0 && reset > 0, "kept {kept}, reset {reset}");
    }

    #[test]
    fn full_fill_probability_matches_the_bare_strategy() {
        let layer = grid();
        let config = ColoringConfig { strategy: ColoringStrategy::Random, seed: 3, ..Default::default() };
        let graph = Graph::from_pairs(layer.len(), &[]);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let bare = config.strategy.assign(&graph, &config.palette, config.default_fill, &mut rng).unwrap();
        assert_eq!(layer.assign_colors(&config).unwrap(), bare);
    }

    #[test]
    fn fill_probability_out_of_range_is_rejected() {
        let config = ColoringConfig { fill_probability: 1.5, ..Default::default() };
        assert!(grid().assign_colors(&config).is_err());
    }

    #[test]
    fn empty_palette_fails_before_coloring() {
        let config = ColoringConfig { palette: Palette::new(vec![]), ..Default::default() };
        let err = grid().color(&config).unwrap_err();
        assert!(err.to_string().contains("palette is empty"));
    }

    #[test]
    fn poster_bounds_requires_geometry() {
        let layer = NeighborhoodLayer::new(vec![]);
        assert!(layer.poster_bounds(&BoundsConfig::default()).is_err());
    }
}
