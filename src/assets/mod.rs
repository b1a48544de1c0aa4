/// Straight-alpha RGBA bitmaps.
pub mod bitmap;
/// Raster and SVG decoding.
pub mod decode;
/// URL and path loading.
pub mod loader;
