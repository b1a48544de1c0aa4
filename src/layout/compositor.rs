use crate::assets::bitmap::Bitmap;
use crate::foundation::core::Rect;
use crate::foundation::error::PosterResult;
use crate::layout::metrics::{FALLBACK_COVER_BOTTOM, FALLBACK_COVER_TOP, LayoutMetrics};
use crate::render::surface::Surface;

const FALLBACK_GRADIENT_STEPS: u32 = 256;

/// Draw the cover across the full page width, clipped to the rounded mask.
///
/// With artwork the height follows the image's aspect ratio; without it a gradient fills
/// [`LayoutMetrics::fallback_cover_height`]. Returns the occupied rect; its `y1` anchors
/// everything below.
pub fn place_cover_image(
    surface: &mut dyn Surface,
    image: Option<&Bitmap>,
    metrics: &LayoutMetrics,
) -> PosterResult<Rect> {
    let width = metrics.page_width;
    let dest = match image {
        Some(image) => {
            let dest = Rect::new(0.0, 0.0, width, width / image.aspect_ratio());
            surface.draw_image(image, dest, metrics.corner_radius)?;
            dest
        }
        None => {
            let fill = Bitmap::vertical_gradient(
                FALLBACK_COVER_TOP,
                FALLBACK_COVER_BOTTOM,
                FALLBACK_GRADIENT_STEPS,
            );
            let dest = Rect::new(0.0, 0.0, width, metrics.fallback_cover_height);
            surface.draw_image(&fill, dest, metrics.corner_radius)?;
            dest
        }
    };
    tracing::debug!(
        height = dest.height(),
        artwork = image.is_some(),
        "placed cover"
    );
    Ok(dest)
}

/// Largest `(width, height)` with the source aspect ratio that fits in `max_w × max_h`.
pub fn fit_within(src_w: f64, src_h: f64, max_w: f64, max_h: f64) -> (f64, f64) {
    if src_w <= 0.0 || src_h <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (max_w / src_w).min(max_h / src_h);
    (src_w * scale, src_h * scale)
}

/// Draw a scan code inside `bounds`, right-aligned and vertically centered. Returns the drawn rect.
pub fn place_scan_code(
    surface: &mut dyn Surface,
    code: &Bitmap,
    bounds: Rect,
) -> PosterResult<Rect> {
    let (w, h) = fit_within(
        f64::from(code.width()),
        f64::from(code.height()),
        bounds.width(),
        bounds.height(),
    );
    let cy = bounds.center().y;
    let dest = Rect::new(bounds.x1 - w, cy - h / 2.0, bounds.x1, cy + h / 2.0);
    surface.draw_image(code, dest, 0.0)?;
    Ok(dest)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compositor.rs"]
mod tests;
