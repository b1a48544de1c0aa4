use anyhow::Context;

use crate::assets::bitmap::Bitmap;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// SVGs are rasterized at least this wide so scan codes stay crisp at print scale.
const SVG_MIN_RASTER_WIDTH: f32 = 640.0;
const SVG_MAX_DIM: u32 = 8_192;

/// Decode raster (PNG, JPEG, ...) or SVG bytes into a [`Bitmap`].
pub fn decode_image(bytes: &[u8]) -> PosterResult<Bitmap> {
    if looks_like_svg(bytes) {
        return rasterize_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| PosterError::image_load(format!("{e:#}")))?;
    Bitmap::from_image(dyn_img.to_rgba8())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn rasterize_svg(bytes: &[u8]) -> PosterResult<Bitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| PosterError::image_load(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    if !size.width().is_finite() || size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(PosterError::image_load("svg has invalid width/height"));
    }
    let scale = (SVG_MIN_RASTER_WIDTH / size.width()).max(1.0);
    let w = ((size.width() * scale).ceil() as u32).max(1);
    let h = ((size.height() * scale).ceil() as u32).max(1);
    if w > SVG_MAX_DIM || h > SVG_MAX_DIM {
        return Err(PosterError::image_load(format!(
            "svg raster size too large: {w}x{h} (max {SVG_MAX_DIM}x{SVG_MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| PosterError::image_load("failed to allocate svg pixmap"))?;
    let sx = (w as f32) / size.width();
    let sy = (h as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    Bitmap::from_rgba8(w, h, rgba)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
