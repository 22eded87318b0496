use geo::{BoundingRect, MultiPolygon};
use rstar::{RTree, AABB};

use crate::geom::{BoundingBox, IndexedRect};

/// Geometries represents an indexed collection of MultiPolygons with an R-tree over their bounds.
#[derive(Debug, Clone)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<IndexedRect>,
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    /// Empty MultiPolygons have no bounds and are left out of the R-tree.
    pub(crate) fn new(polygons: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                polygons.iter().enumerate()
                    .filter_map(|(i, polygon)| polygon.bounding_rect().map(|rect| IndexedRect::new(i, rect)))
                    .collect()
            ),
            shapes: polygons,
        }
    }

    /// Get a reference to the list of MultiPolygons.
    #[inline] pub(crate) fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Query the R-tree for shapes whose bounds intersect the given envelope.
    #[inline]
    pub(crate) fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item = usize> + '_ {
        self.rtree.locate_in_envelope_intersecting(envelope).map(|entry| entry.idx())
    }

    /// Compute the bounding box of all MultiPolygons.
    pub(crate) fn bounds(&self) -> Option<BoundingBox> {
        self.shapes.iter()
            .filter_map(|polygon| polygon.bounding_rect())
            .map(BoundingBox::from)
            .reduce(|a, b| a.union(&b))
    }
}
