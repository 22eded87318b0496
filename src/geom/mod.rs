mod bbox;
mod geom;
pub(crate) mod ratio;

pub use bbox::BoundingBox;
pub(crate) use bbox::IndexedRect;
pub(crate) use geom::Geometries;
pub use ratio::{adjust_to_ratio, longitude_distance, one_mile_lon, LatLonDist, ONE_KM, ONE_MILE, ONE_MILE_EQUATOR_DEG};
