//! Aspect-ratio adjustment of geographic bounding boxes.
//!
//! One degree of longitude covers less ground than one degree of latitude
//! everywhere except the equator. Widths are therefore scaled by the cosine of
//! the box's middle latitude before being compared against heights.

use anyhow::Result;
use tracing::{debug, warn};

use crate::{common::ConfigError, geom::BoundingBox};

/// A distance expressed in latitude (`y`) and longitude (`x`) degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonDist {
    pub y: f64,
    pub x: f64,
}

/// One mile in latitude and longitude degrees, as measured around Baltimore.
pub const ONE_MILE: LatLonDist = LatLonDist { y: 0.014_492_753_623_188_4, x: 0.018_181_818_181_818_2 };

/// One kilometer in latitude and longitude degrees, as measured around Baltimore.
pub const ONE_KM: LatLonDist = LatLonDist { y: 0.008_983, x: 0.011_363_6 };

/// One mile in degrees along the equator.
pub const ONE_MILE_EQUATOR_DEG: f64 = 1.0 / 69.172;

/// Longitude span between `lon1` and `lon2`, scaled to latitude-degree units at `latitude`.
///
/// This is a ratio correction for comparing widths with heights, not a geodesic
/// distance. It is antisymmetric in its first two arguments.
#[inline]
pub fn longitude_distance(lon1: f64, lon2: f64, latitude: f64) -> f64 {
    (lon2 - lon1) * latitude.to_radians().cos()
}

/// One mile in longitude degrees at `latitude` (spherical approximation).
#[inline]
pub fn one_mile_lon(latitude: f64) -> f64 {
    ONE_MILE_EQUATOR_DEG * latitude.to_radians().cos()
}

fn check_ratio_params(target_ratio: f64, margin_fraction_north: f64) -> Result<(), ConfigError> {
    if !target_ratio.is_finite() || target_ratio <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            name: "target_ratio",
            value: target_ratio,
            reason: "must be positive and finite",
        });
    }
    if !(0.0..=1.0).contains(&margin_fraction_north) {
        return Err(ConfigError::InvalidParameter {
            name: "margin_fraction_north",
            value: margin_fraction_north,
            reason: "must lie in [0, 1]",
        });
    }
    Ok(())
}

/// Expand `(west, south, east, north)` vertically to reach `target_ratio` (height:width).
///
/// The added height is split between the edges: the north edge moves up by
/// `margin_fraction_north` of it and the south edge moves down by the rest.
/// A width-dominant box yields a negative extra height, which shrinks the box
/// by the same rule; check [`BoundingBox::extra_height`] first if that matters.
pub fn adjust_to_ratio(
    west: f64,
    south: f64,
    east: f64,
    north: f64,
    target_ratio: f64,
    margin_fraction_north: f64,
) -> Result<BoundingBox> {
    BoundingBox::try_new(west, south, east, north)?
        .adjust_to_ratio(target_ratio, margin_fraction_north)
}

impl BoundingBox {
    /// Height that must be added to this box to reach `target_ratio`.
    /// Negative when the box is already taller than the target.
    pub fn extra_height(&self, target_ratio: f64) -> f64 {
        let width = longitude_distance(self.west, self.east, self.mid_latitude());
        target_ratio * width - self.height()
    }

    /// Height-to-width ratio using the cosine-corrected width at `latitude`.
    pub fn aspect_ratio_at(&self, latitude: f64) -> f64 {
        self.height() / longitude_distance(self.west, self.east, latitude)
    }

    /// Pad west and east by `miles` miles of longitude at the box's middle latitude.
    pub fn pad_miles(&self, miles: f64) -> Result<BoundingBox> {
        self.validate()?;
        if !miles.is_finite() || miles < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "pad_miles",
                value: miles,
                reason: "must be non-negative and finite",
            }.into());
        }
        let pad = miles * one_mile_lon(self.mid_latitude());
        Ok(BoundingBox { west: self.west - pad, east: self.east + pad, ..*self })
    }

    /// See [`adjust_to_ratio`].
    pub fn adjust_to_ratio(&self, target_ratio: f64, margin_fraction_north: f64) -> Result<BoundingBox> {
        self.validate()?;
        check_ratio_params(target_ratio, margin_fraction_north)?;

        let extra = self.extra_height(target_ratio);
        if extra < 0.0 {
            warn!("[geom::ratio] box is wider than ratio {target_ratio}; shrinking height by {:.6}", -extra);
        }

        let adjusted = BoundingBox {
            north: self.north + extra * margin_fraction_north,
            south: self.south - extra * (1.0 - margin_fraction_north),
            ..*self
        };
        debug!("[geom::ratio] adjusted {:?} -> {:?}", self.to_tuple(), adjusted.to_tuple());
        Ok(adjusted)
    }
}
