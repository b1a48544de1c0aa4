/// Cover and scan code placement.
pub mod compositor;
/// The layout engine.
pub mod engine;
/// Page size and units.
pub mod geometry;
/// Per-variant layout constants.
pub mod metrics;
