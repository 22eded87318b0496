use std::{io::Write, path::Path};

use anyhow::Result;
use geo::Coord;
use tracing::info;

use crate::{
    common,
    config::StyleConfig,
    geom::{longitude_distance, BoundingBox},
    map::ColoredNeighborhood,
};

/// Width and height in pixels of a poster covering `bounds` at `width` pixels across.
/// Longitudes are scaled by the cosine of the middle latitude.
pub fn poster_size(bounds: &BoundingBox, width: f64) -> (f64, f64) {
    let ground_width = longitude_distance(bounds.west, bounds.east, bounds.mid_latitude());
    (width, width * bounds.height() / ground_width)
}

/// Draw the colored neighborhoods over `bounds` as an SVG poster.
pub fn write_poster_svg<W: Write>(writer: &mut W, neighborhoods: &[ColoredNeighborhood], bounds: &BoundingBox, style: &StyleConfig) -> Result<()> {
    bounds.validate()?;

    let (width, height) = poster_size(bounds, style.width);
    let scale = height / bounds.height(); // pixels per latitude degree
    let cos_lat = bounds.mid_latitude().to_radians().cos();
    let (west, north) = (bounds.west, bounds.north);

    // lon/lat -> SVG coords (Y down)
    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = (coord.x - west) * cos_lat * scale;
        let y = (north - coord.y) * scale;
        (x, y)
    };

    common::write_svg_header(writer, width, height, style.background, bounds)?;
    common::write_svg_styles(writer, style.line_color, style.line_width, style.fill_opacity)?;
    if let Some(spacing) = style.grid.spacing() {
        common::draw_grid(writer, bounds, spacing, style.grid_color, &project)?;
    }
    common::draw_polygons_with_fill(
        writer,
        neighborhoods.iter().map(|n| (&n.geometry, n.color, n.name.as_str())),
        &project,
    )?;
    common::write_svg_footer(writer)?;

    Ok(())
}

/// Write the poster to an SVG file.
pub fn write_poster_svg_file(path: &Path, neighborhoods: &[ColoredNeighborhood], bounds: &BoundingBox, style: &StyleConfig) -> Result<()> {
    let mut writer = common::SvgWriter::new(path)?;
    write_poster_svg(&mut writer, neighborhoods, bounds, style)?;
    writer.flush()?;
    info!("[map::svg] wrote {} neighborhoods to {}", neighborhoods.len(), path.display());
    Ok(())
}
