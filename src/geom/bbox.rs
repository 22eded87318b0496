use anyhow::Result;
use geo::{Coord, Rect};
use rstar::{RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    /// Construct a bounding box, failing if it is empty, inverted, or not finite.
    pub fn try_new(west: f64, south: f64, east: f64, north: f64) -> Result<Self> {
        let bbox = Self::new(west, south, east, north);
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check that `west < east`, `south < north`, and all values are finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.west, self.south, self.east, self.north].iter().all(|v| v.is_finite());
        if !finite || self.west >= self.east || self.south >= self.north {
            return Err(ConfigError::DegenerateBounds {
                west: self.west,
                south: self.south,
                east: self.east,
                north: self.north,
            });
        }
        Ok(())
    }

    #[inline] pub fn width(&self) -> f64 { self.east - self.west }

    #[inline] pub fn height(&self) -> f64 { self.north - self.south }

    /// Latitude halfway between the south and north edges.
    #[inline] pub fn mid_latitude(&self) -> f64 { (self.south + self.north) / 2.0 }

    /// The box as a `(west, south, east, north)` tuple.
    #[inline] pub fn to_tuple(&self) -> (f64, f64, f64, f64) { (self.west, self.south, self.east, self.north) }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(bbox: BoundingBox) -> Self {
        Rect::new(
            Coord { x: bbox.west, y: bbox.south },
            Coord { x: bbox.east, y: bbox.north },
        )
    }
}

/// A bounding rectangle in an R-tree, associated with a MultiPolygon by index.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRect {
    idx: usize, // Index of corresponding MultiPolygon in shapes
    rect: Rect<f64>,
}

impl IndexedRect {
    pub(crate) fn new(idx: usize, rect: Rect<f64>) -> Self {
        Self { idx, rect }
    }

    /// Get the index of the corresponding MultiPolygon.
    pub(crate) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for IndexedRect {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.rect.min().into(), self.rect.max().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_boxes_are_rejected() {
        assert!(BoundingBox::try_new(-76.7, 39.2, -76.5, 39.3).is_ok());
        assert!(BoundingBox::try_new(-76.5, 39.2, -76.7, 39.3).is_err());
        assert!(BoundingBox::try_new(-76.7, 39.3, -76.5, 39.3).is_err());
        assert!(BoundingBox::try_new(f64::NAN, 39.2, -76.5, 39.3).is_err());
    }

    #[test]
    fn rect_conversion_preserves_corners() {
        let bbox = BoundingBox::new(-1.0, 2.0, 3.0, 4.0);
        let rect: Rect<f64> = bbox.into();
        assert_eq!(BoundingBox::from(rect), bbox);
    }

    #[test]
    fn union_covers_both() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(0.5, -1.0, 2.0, 0.5);
        assert_eq!(a.union(&b), BoundingBox::new(0.0, -1.0, 2.0, 1.0));
    }
}
