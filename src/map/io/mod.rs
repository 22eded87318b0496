mod geojson;
mod svg;

pub use geojson::{colored_to_geojson, write_colored_geojson};
pub use svg::{poster_size, write_poster_svg, write_poster_svg_file};
