//! Document Builder: maps a WISPRO-style operations export onto the
//! fixed-shape contract model consumed by the validation engine.

mod builder;
mod error;

pub use builder::{Period, build_contract};
pub use error::{MapError, Result};
