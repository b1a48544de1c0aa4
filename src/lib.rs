//! Sleeve renders print-resolution posters for music albums and single tracks.
//!
//! A render is one call to [`render_poster`]:
//!
//! - Describe the poster with a [`PosterDescription`] (hand-written JSON, or normalized from
//!   catalog records via [`catalog`])
//! - Size a [`Surface`] to the variant's [`PosterGeometry::pixel_size`] ([`CpuSurface`] for PNG
//!   output)
//! - Supply an [`ImageLoader`] for cover art and scan codes, and a seeded or unseeded RNG for
//!   palette extraction
//!
//! Layout math runs in logical units (100 per inch) and is scaled to 300 dpi by the surface.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Bitmaps, decoding and image loading.
pub mod assets;
/// Catalog record normalization and reference parsing.
pub mod catalog;
/// Render settings.
pub mod config;
/// Page geometry, layout constants, compositing and the layout engine.
pub mod layout;
/// Poster description model.
pub mod model;
/// Palette extraction.
pub mod palette;
/// Raster surfaces and fonts.
pub mod render;
/// Line packing, title fitting and number formatting.
pub mod text;

pub use crate::foundation::core::{Rect, Rgb8};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::assets::bitmap::Bitmap;
pub use crate::assets::loader::{DefaultImageLoader, ImageLoader};
pub use crate::catalog::{CatalogAlbum, CatalogRef, CatalogTrack, ScanCodeOptions};
pub use crate::config::RenderSettings;
pub use crate::layout::engine::{
    BlockKind, Degradation, PlacedBlock, RenderContext, RenderReport, render_poster,
};
pub use crate::layout::geometry::PosterGeometry;
pub use crate::model::{PosterDescription, Variant};
pub use crate::palette::extract::{Palette, PaletteSource, extract_palette};
pub use crate::render::cpu::{CpuSurface, RasterRGBA};
pub use crate::render::fonts::{FontFace, FontSet};
pub use crate::render::surface::{FontSpec, FontWeight, Surface, TextAlign};
pub use crate::text::format::format_duration;
