use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::{
    common,
    config::NamesConfig,
    map::{ColoredNeighborhood, Neighborhood, NeighborhoodLayer},
};

impl NeighborhoodLayer {
    /// Read neighborhoods from a GeoJSON file and apply the configured renames.
    pub fn read_geojson(path: &Path, names: &NamesConfig) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[map::geojson] Failed to read {}", path.display()))?;
        let mut layer = Self::from_geojson_bytes(&bytes, &names.field)
            .with_context(|| format!("[map::geojson] Failed to load {}", path.display()))?;
        info!("[map::geojson] loaded {} neighborhoods from {}", layer.len(), path.display());

        let renamed = layer.rename(&names.renames);
        if renamed > 0 { info!("[map::geojson] renamed {renamed} neighborhoods") }

        let duplicates = layer.duplicate_names();
        if !duplicates.is_empty() {
            warn!("[map::geojson] duplicate neighborhood names: {}", duplicates.join(", "));
        }

        Ok(layer)
    }

    /// Parse neighborhoods from GeoJSON bytes, taking names from `name_field` (or `name`).
    /// Features without either property are named by their index.
    pub fn from_geojson_bytes(bytes: &[u8], name_field: &str) -> Result<Self> {
        let features = common::read_area_features(bytes)?;

        let neighborhoods = features.into_iter().enumerate()
            .map(|(i, feature)| {
                let name = [name_field, "name"].iter()
                    .find_map(|field| feature.properties.get(*field).and_then(Value::as_str))
                    .map_or_else(|| format!("#{i}"), str::to_string);
                Neighborhood::new(name, feature.geometry)
            })
            .collect();

        Ok(Self::new(neighborhoods))
    }
}

/// Build a GeoJSON FeatureCollection with `name`, `color` and `centroid` properties.
pub fn colored_to_geojson(neighborhoods: &[ColoredNeighborhood]) -> Value {
    use geo::Centroid;

    common::area_features_to_geojson(neighborhoods.iter().map(|n| {
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!(n.name));
        properties.insert("color".to_string(), json!(n.color.to_string()));
        if let Some(centroid) = n.geometry.centroid() {
            properties.insert("centroid".to_string(), json!([centroid.x(), centroid.y()]));
        }
        (&n.geometry, properties)
    }))
}

/// Write colored neighborhoods to a GeoJSON file.
pub fn write_colored_geojson(path: &Path, neighborhoods: &[ColoredNeighborhood]) -> Result<()> {
    common::write_json_file(path, &colored_to_geojson(neighborhoods))?;
    info!("[map::geojson] wrote {} neighborhoods to {}", neighborhoods.len(), path.display());
    Ok(())
}
