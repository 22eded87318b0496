pub mod bounds;
pub mod color;
pub mod render;

use anyhow::Result;
use citymap::{NeighborhoodLayer, PosterConfig};

use crate::cli::{Cli, ColoringArgs, ExtentArgs};

/// Load the config named on the command line (or defaults).
pub(crate) fn load_config(cli: &Cli) -> Result<PosterConfig> {
    PosterConfig::load(cli.config.as_deref())
}

/// Apply command-line overrides to the coloring section.
pub(crate) fn apply_overrides(config: &mut PosterConfig, args: &ColoringArgs) {
    if let Some(strategy) = &args.strategy { config.coloring.strategy = strategy.parse().unwrap_or_default() }
    if let Some(seed) = args.seed { config.coloring.seed = seed }
    if let Some(prob) = args.color_prob { config.coloring.fill_probability = prob }
}

/// Apply command-line overrides to the bounds section.
pub(crate) fn apply_extent(config: &mut PosterConfig, args: &ExtentArgs) {
    if args.tight { config.bounds.tight = true }
}

/// Read the neighborhoods file with the configured name handling.
pub(crate) fn load_layer(path: &std::path::Path, config: &PosterConfig) -> Result<NeighborhoodLayer> {
    NeighborhoodLayer::read_geojson(path, &config.names)
}
