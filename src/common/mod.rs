mod error;
mod io;

pub use error::ConfigError;
pub(crate) use io::*;
