use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};
use tracing::debug;

/// An areal GeoJSON feature: its properties and its geometry as a MultiPolygon.
#[derive(Debug, Clone)]
pub(crate) struct AreaFeature {
    pub(crate) properties: Map<String, Value>,
    pub(crate) geometry: MultiPolygon<f64>,
}

/// Read Polygon and MultiPolygon features from GeoJSON FeatureCollection bytes.
/// Features with other geometry types (or none) are skipped.
pub(crate) fn read_area_features(bytes: &[u8]) -> Result<Vec<AreaFeature>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON")?;

    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[io::geojson] Expected a FeatureCollection, found {}", value["type"]);
    }
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no features array"))?;

    let mut out = Vec::with_capacity(features.len());
    for (i, feature) in features.iter().enumerate() {
        let geometry = &feature["geometry"];
        let coords = geometry["coordinates"].as_array();

        let shape = match (geometry["type"].as_str(), coords) {
            (Some("Polygon"), Some(coords)) => MultiPolygon(vec![parse_polygon_coords(coords)
                .with_context(|| format!("[io::geojson] feature {i}"))?]),
            (Some("MultiPolygon"), Some(coords)) => parse_multipolygon_coords(coords)
                .with_context(|| format!("[io::geojson] feature {i}"))?,
            (ty, _) => {
                debug!("[io::geojson] skipping feature {i} with geometry type {ty:?}");
                continue;
            }
        };

        let properties = feature["properties"].as_object().cloned().unwrap_or_default();
        out.push(AreaFeature { properties, geometry: shape });
    }

    Ok(out)
}

/// Build a GeoJSON FeatureCollection from MultiPolygons and per-feature properties.
pub(crate) fn area_features_to_geojson<'a>(features: impl IntoIterator<Item = (&'a MultiPolygon<f64>, Map<String, Value>)>) -> Value {
    let features = features.into_iter()
        .map(|(shape, properties)| json!({
            "type": "Feature",
            "geometry": multipolygon_to_geojson(shape),
            "properties": properties,
        }))
        .collect::<Vec<_>>();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Convert a MultiPolygon to a GeoJSON MultiPolygon geometry.
fn multipolygon_to_geojson(shape: &MultiPolygon<f64>) -> Value {
    let polygons = shape.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

/// Parse GeoJSON MultiPolygon coordinates: `[polygon, ...]`.
fn parse_multipolygon_coords(coords: &[Value]) -> Result<MultiPolygon<f64>> {
    coords.iter()
        .map(|polygon| {
            let rings = polygon.as_array()
                .ok_or_else(|| anyhow!("Invalid MultiPolygon: polygon is not an array"))?;
            parse_polygon_coords(rings)
        })
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon)
}

/// Parse GeoJSON Polygon coordinates: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        let ring = ring.as_array()
            .ok_or_else(|| anyhow!("Invalid Polygon: ring is not an array"))?;
        parse_ring_coords(ring)
    });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from GeoJSON coordinates `[[x, y], ...]`, closing it if needed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len() + 1);

    for coord_pair in coords {
        let coord_array = coord_pair.as_array()
            .filter(|array| array.len() >= 2)
            .ok_or_else(|| anyhow!("Invalid coordinate: expected [x, y], found {coord_pair}"))?;
        let x = coord_array[0].as_f64()
            .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = coord_array[1].as_f64()
            .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "Name": "A" },
              "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]] } },
            { "type": "Feature", "properties": { "Name": "Fountain" },
              "geometry": { "type": "Point", "coordinates": [0.5, 0.5] } },
            { "type": "Feature", "properties": { "Name": "B" },
              "geometry": { "type": "MultiPolygon", "coordinates": [
                  [[[2, 0], [4, 0], [4, 2], [2, 2], [2, 0]], [[2.5, 0.5], [3, 0.5], [3, 1], [2.5, 0.5]]],
                  [[[5, 5], [6, 5], [6, 6], [5, 5]]]
              ] } }
        ]
    }"#;

    #[test]
    fn reads_polygons_and_skips_points() {
        let features = read_area_features(SAMPLE.as_bytes()).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].properties["Name"], "A");
        assert_eq!(features[0].geometry.0.len(), 1);
        assert_eq!(features[1].geometry.0.len(), 2);
        assert_eq!(features[1].geometry.0[0].interiors().len(), 1);
    }

    #[test]
    fn open_rings_are_closed() {
        let features = read_area_features(SAMPLE.as_bytes()).unwrap();
        let exterior = features[0].geometry.0[0].exterior();
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn rejects_non_collections_and_bad_coordinates() {
        assert!(read_area_features(br#"{ "type": "Feature" }"#).is_err());
        assert!(read_area_features(b"not json").is_err());
        let bad = br#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Polygon", "coordinates": [[["a", 0], [1, 0], [1, 1]]] } }
        ] }"#;
        assert!(read_area_features(bad).is_err());
    }

    #[test]
    fn written_geometry_reads_back() {
        let features = read_area_features(SAMPLE.as_bytes()).unwrap();
        let doc = area_features_to_geojson(features.iter().map(|f| (&f.geometry, f.properties.clone())));
        let bytes = serde_json::to_vec(&doc).unwrap();
        let again = read_area_features(&bytes).unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again[1].geometry, features[1].geometry);
        assert_eq!(again[1].properties["Name"], "B");
    }
}
