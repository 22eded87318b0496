use thiserror::Error;

/// Configuration and precondition failures that abort a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("palette is empty; the {strategy} strategy needs at least one color")]
    EmptyPalette { strategy: &'static str },

    #[error("invalid color {0:?}; expected #rrggbb or #rgb")]
    InvalidColor(String),

    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    #[error("degenerate bounding box (west={west}, south={south}, east={east}, north={north})")]
    DegenerateBounds { west: f64, south: f64, east: f64, north: f64 },
}
