use geo::MultiPolygon;

use crate::color::Color;

/// A named neighborhood boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

impl Neighborhood {
    pub fn new(name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self { name: name.into(), geometry }
    }
}

/// A neighborhood together with the fill color assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredNeighborhood {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    pub color: Color,
}
