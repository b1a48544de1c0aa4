use crate::assets::bitmap::Bitmap;
use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::PosterResult;

/// Face weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Body text.
    Regular,
    /// Titles and headers.
    Bold,
}

/// Font selection for one text run. `size` is in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Em size in logical units.
    pub size: f64,
    /// Face weight.
    pub weight: FontWeight,
}

impl FontSpec {
    /// Regular weight at `size`.
    pub const fn regular(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    /// Bold weight at `size`.
    pub const fn bold(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Horizontal anchor for [`Surface::fill_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge.
    Left,
    /// `x` is the right edge.
    Right,
}

/// Raster target the layout engine paints into.
///
/// The caller sizes the surface before rendering; the engine only installs a logical-to-pixel
/// scale with [`Surface::begin`]. All other coordinates are logical units.
pub trait Surface {
    /// Pixel dimensions of the underlying buffer.
    fn pixel_size(&self) -> (u32, u32);

    /// Clear every pixel to transparent and install the logical-to-pixel scale.
    fn begin(&mut self, scale_x: f64, scale_y: f64) -> PosterResult<()>;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgb8) -> PosterResult<()>;

    /// Stretch `image` into `dest`, clipped to a rounded rectangle of `corner_radius`.
    fn draw_image(&mut self, image: &Bitmap, dest: Rect, corner_radius: f64) -> PosterResult<()>;

    /// Advance width of `text` set in `font`.
    fn text_width(&mut self, text: &str, font: &FontSpec) -> PosterResult<f64>;

    /// Draw one line of text with its baseline at `baseline_y`.
    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        baseline_y: f64,
        font: &FontSpec,
        color: Rgb8,
        align: TextAlign,
    ) -> PosterResult<()>;

    /// Commit pending drawing to the pixel buffer.
    fn finish(&mut self) -> PosterResult<()>;
}
