//! Shared primitives: errors, colors, geometry re-exports, pixel math.

pub mod core;
pub mod error;
pub(crate) mod math;
