mod palette;
mod strategy;

pub use palette::{baltimore, Color, Palette};
pub use strategy::ColoringStrategy;
