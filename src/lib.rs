#![doc = "citymap public API: poster bounds and adjacency-aware neighborhood coloring"]
mod color;
mod common;
mod config;
mod geom;
mod graph;
mod map;

#[doc(inline)]
pub use color::{baltimore, Color, ColoringStrategy, Palette};

#[doc(inline)]
pub use common::ConfigError;

#[doc(inline)]
pub use config::{BoundsConfig, ColoringConfig, GridUnit, NamesConfig, PosterConfig, StyleConfig};

#[doc(inline)]
pub use geom::{adjust_to_ratio, longitude_distance, one_mile_lon, BoundingBox, LatLonDist, ONE_KM, ONE_MILE, ONE_MILE_EQUATOR_DEG};

#[doc(inline)]
pub use graph::Graph;

#[doc(inline)]
pub use map::{
    colored_to_geojson, poster_size, write_colored_geojson, write_poster_svg, write_poster_svg_file,
    ColoredNeighborhood, Neighborhood, NeighborhoodLayer,
};
