mod io;
mod layer;
mod neighborhood;

pub use io::{colored_to_geojson, poster_size, write_colored_geojson, write_poster_svg, write_poster_svg_file};
pub use layer::NeighborhoodLayer;
pub use neighborhood::{ColoredNeighborhood, Neighborhood};
