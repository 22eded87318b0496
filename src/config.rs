//! Run configuration, read from a JSON document.
//!
//! Every field has a default, so an empty object `{}` is a complete config.

use std::{collections::BTreeMap, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    color::{Color, ColoringStrategy, Palette},
    common,
    geom::{BoundingBox, LatLonDist, ONE_KM, ONE_MILE},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub bounds: BoundsConfig,
    pub coloring: ColoringConfig,
    pub names: NamesConfig,
    pub style: StyleConfig,
}

impl PosterConfig {
    /// Read a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config: Self = common::read_json_file(path)?;
        info!("[config] loaded {}", path.display());
        Ok(config)
    }

    /// Read a config from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_json_file)
    }
}

/// Parameters of the bounding-box adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Target height:width ratio of the poster.
    pub target_ratio: f64,
    /// Share of the added height placed above the north edge; the rest goes below the south edge.
    pub margin_fraction_north: f64,
    /// Miles of longitude added on each of the west and east edges.
    pub pad_miles: f64,
    /// Use the raw bounds with no padding or ratio adjustment.
    pub tight: bool,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self { target_ratio: 1.5, margin_fraction_north: 0.3, pad_miles: 1.0, tight: false }
    }
}

impl BoundsConfig {
    /// Pad, then adjust `bbox` to the target ratio. Returns `bbox` unchanged in tight mode.
    pub fn apply(&self, bbox: &BoundingBox) -> Result<BoundingBox> {
        bbox.validate()?;
        if self.tight { return Ok(*bbox) }

        bbox.pad_miles(self.pad_miles)?
            .adjust_to_ratio(self.target_ratio, self.margin_fraction_north)
    }
}

/// Parameters of the neighborhood coloring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColoringConfig {
    pub strategy: ColoringStrategy,
    pub palette: Palette,
    /// Seed for the random and constrained strategies and for `fill_probability`.
    pub seed: u64,
    /// Fill for the `none` strategy and for polygons left uncolored by `fill_probability`.
    pub default_fill: Color,
    /// Polygons closer than this many degrees count as adjacent, in addition to intersecting ones.
    pub adjacency_tolerance: f64,
    /// Probability that a polygon keeps its strategy color instead of `default_fill`.
    pub fill_probability: f64,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            strategy: ColoringStrategy::Greedy,
            palette: Palette::default(),
            seed: 14,
            default_fill: Color::new(0x33, 0x33, 0x33),
            adjacency_tolerance: 0.0,
            fill_probability: 1.0,
        }
    }
}

/// Where names come from and how to normalize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// Feature property holding the name. `name` is tried when this is missing.
    pub field: String,
    /// Replacement names, keyed by the name found in the source file.
    pub renames: BTreeMap<String, String>,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self { field: "Name".to_string(), renames: BTreeMap::new() }
    }
}

/// SVG poster styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Poster width in pixels; the height follows from the bounds.
    pub width: f64,
    pub background: Color,
    pub line_color: Color,
    pub line_width: f64,
    pub fill_opacity: f64,
    /// Spacing of the dashed background grid.
    pub grid: GridUnit,
    pub grid_color: Color,
}

/// Background grid spacing for the poster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridUnit {
    None,
    #[default]
    Mile,
    Km,
}

impl GridUnit {
    /// Grid step in latitude and longitude degrees, if a grid is drawn.
    pub fn spacing(&self) -> Option<LatLonDist> {
        match self {
            GridUnit::None => None,
            GridUnit::Mile => Some(ONE_MILE),
            GridUnit::Km => Some(ONE_KM),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            width: 2400.0,
            background: Color::new(0xff, 0xff, 0xff),
            line_color: Color::new(0xcc, 0xcc, 0xcc),
            line_width: 0.5,
            fill_opacity: 1.0,
            grid: GridUnit::Mile,
            grid_color: Color::new(0xcc, 0xcc, 0xcc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::baltimore;

    #[test]
    fn empty_document_gives_defaults() {
        let config: PosterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PosterConfig::default());
        assert_eq!(config.bounds.margin_fraction_north, 0.3);
        assert_eq!(config.coloring.strategy, ColoringStrategy::Greedy);
        assert_eq!(config.coloring.palette.colors()[0], baltimore::RED);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: PosterConfig = serde_json::from_str(r##"{
            "coloring": { "strategy": "constrained", "palette": ["#000000", "#ffffff"], "seed": 3 },
            "names": { "renames": { "Old Town": "Oldtown" } }
        }"##).unwrap();

        assert_eq!(config.coloring.strategy, ColoringStrategy::Constrained);
        assert_eq!(config.coloring.palette.len(), 2);
        assert_eq!(config.coloring.seed, 3);
        assert_eq!(config.coloring.fill_probability, 1.0);
        assert_eq!(config.names.field, "Name");
        assert_eq!(config.names.renames["Old Town"], "Oldtown");
        assert_eq!(config.bounds, BoundsConfig::default());
    }

    #[test]
    fn invalid_color_is_rejected() {
        let result = serde_json::from_str::<PosterConfig>(r#"{ "style": { "background": "white" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn grid_unit_picks_spacing() {
        let config: PosterConfig = serde_json::from_str(r#"{ "style": { "grid": "km" } }"#).unwrap();
        assert_eq!(config.style.grid.spacing(), Some(ONE_KM));
        assert_eq!(StyleConfig::default().grid.spacing(), Some(ONE_MILE));
        assert_eq!(GridUnit::None.spacing(), None);
    }

    #[test]
    fn tight_bounds_are_unchanged() {
        let bbox = BoundingBox::new(-76.7, 39.2, -76.5, 39.3);
        let config = BoundsConfig { tight: true, ..Default::default() };
        assert_eq!(config.apply(&bbox).unwrap(), bbox);
    }

    #[test]
    fn apply_pads_then_reaches_ratio() {
        let bbox = BoundingBox::new(-76.7, 39.2, -76.5, 39.3);
        let config = BoundsConfig::default();
        let adjusted = config.apply(&bbox).unwrap();
        assert!(adjusted.west < bbox.west && adjusted.east > bbox.east);
        assert!(adjusted.south < bbox.south && adjusted.north > bbox.north);
        let ratio = adjusted.aspect_ratio_at(bbox.mid_latitude());
        assert!((ratio - 1.5).abs() < 1e-9, "ratio {ratio}");
    }
}
