/// Duration formatting.
pub mod format;
/// Greedy packing, truncation and title fitting.
pub mod wrap;
