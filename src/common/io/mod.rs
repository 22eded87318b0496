mod geojson;
mod json;
mod svg;

pub(crate) use geojson::*;
pub(crate) use json::*;
pub(crate) use svg::*;
