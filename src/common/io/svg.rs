//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use geo::{Coord, CoordsIter, LineString, MultiPolygon};

use crate::{color::Color, geom::{BoundingBox, LatLonDist}};

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

/// Write the XML declaration, the opening <svg> tag and a background rect.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64, background: Color, bounds: &BoundingBox) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width:.0}" height="{height:.0}"
        viewBox="0 0 {width:.3} {height:.3}"
        data-west="{west}" data-south="{south}"
        data-east="{east}" data-north="{north}">"##,
        west = bounds.west,
        south = bounds.south,
        east = bounds.east,
        north = bounds.north,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="{background}"/>"##)?;
    Ok(())
}

/// Write the shared style for neighborhood outlines.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W, line_color: Color, line_width: f64, fill_opacity: f64) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .hood {{ stroke: {line_color}; stroke-width: {line_width}; fill-opacity: {fill_opacity}; stroke-linejoin: round; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Draw dashed grid lines at multiples of `spacing` degrees across `bounds`.
pub(crate) fn draw_grid<W: Write>(writer: &mut W, bounds: &BoundingBox, spacing: LatLonDist, color: Color, project: &Projection) -> Result<()> {
    writeln!(writer, r#"<g class="grid" stroke="{color}" stroke-width="0.5" stroke-dasharray="4 4" fill="none">"#)?;

    let meridians = grid_steps(bounds.west, bounds.east, spacing.x)
        .map(|lon| (Coord { x: lon, y: bounds.north }, Coord { x: lon, y: bounds.south }));
    let parallels = grid_steps(bounds.south, bounds.north, spacing.y)
        .map(|lat| (Coord { x: bounds.west, y: lat }, Coord { x: bounds.east, y: lat }));

    for (start, end) in meridians.chain(parallels) {
        let ((x1, y1), (x2, y2)) = (project(&start), project(&end));
        writeln!(writer, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}"/>"#)?;
    }

    writeln!(writer, "</g>")?;
    Ok(())
}

/// Multiples of `step` within `[min, max]`.
fn grid_steps(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let (first, last) = ((min / step).ceil() as i64, (max / step).floor() as i64);
    (first..=last).map(move |k| k as f64 * step)
}

/// Draw one filled path per MultiPolygon, holes included via even-odd fill.
pub(crate) fn draw_polygons_with_fill<'a>(
    writer: &mut impl Write,
    polygons: impl IntoIterator<Item = (&'a MultiPolygon<f64>, Color, &'a str)>,
    project: &Projection,
) -> Result<()> {
    for (polygon, color, title) in polygons {
        writeln!(writer,
            r#"<path class="hood" fill-rule="evenodd" style="fill:{color}" d="{}"><title>{}</title></path>"#,
            multipolygon_to_path(polygon, project),
            escape_xml(title),
        )?;
    }
    Ok(())
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
