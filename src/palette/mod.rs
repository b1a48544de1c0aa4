/// Palette sampling and ordering.
pub mod extract;
/// Lloyd's k-means over fixed-size samples.
pub mod kmeans;
