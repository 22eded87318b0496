use anyhow::Result;
use geo::{BoundingRect, Distance, Euclidean, Intersects};
use rstar::AABB;
use tracing::debug;

use crate::{common::ConfigError, geom::Geometries, graph::Graph};

impl Geometries {
    /// Build the adjacency graph over all shapes.
    ///
    /// Two shapes are adjacent when they intersect, which includes sharing only
    /// a boundary. With a positive `tolerance`, shapes separated by at most that
    /// Euclidean distance are adjacent as well.
    pub(crate) fn adjacency_graph(&self, tolerance: f64) -> Result<Graph> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "adjacency_tolerance",
                value: tolerance,
                reason: "must be non-negative and finite",
            }.into());
        }

        let shapes = self.shapes();
        let mut adj_list: Vec<Vec<u32>> = vec![Vec::new(); shapes.len()];

        for (i, shape) in shapes.iter().enumerate() {
            let Some(rect) = shape.bounding_rect() else { continue };
            let search = AABB::from_corners(
                [rect.min().x - tolerance, rect.min().y - tolerance],
                [rect.max().x + tolerance, rect.max().y + tolerance],
            );

            for j in self.query(&search) {
                if j <= i { continue } // check each unordered pair once

                let adjacent = shape.intersects(&shapes[j])
                    || (tolerance > 0.0 && Euclidean.distance(shape, &shapes[j]) <= tolerance);

                if adjacent {
                    adj_list[i].push(j as u32);
                    adj_list[j].push(i as u32);
                }
            }
        }

        adj_list.iter_mut().for_each(|neighbors| neighbors.sort_unstable());

        let graph = Graph::new(shapes.len(), &adj_list);
        debug!("[graph::adjacency] {} nodes, {} edges, max degree {}",
            graph.node_count(), graph.edge_count(), graph.max_degree());
        Ok(graph)
    }
}
