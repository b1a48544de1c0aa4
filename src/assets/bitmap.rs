use std::sync::Arc;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Decoded raster image in straight-alpha RGBA8, row-major.
///
/// Always at least 1 × 1. Pixel bytes are shared, so cloning is cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap raw straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::image_load(format!(
                "bitmap must be at least 1x1, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8.len() != expected {
            return Err(PosterError::image_load(format!(
                "bitmap byte length {} does not match {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Convert from an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> PosterResult<Self> {
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.into_raw())
    }

    /// A `1 × steps` opaque gradient from `top` to `bottom`, meant to be stretched.
    pub fn vertical_gradient(top: Rgb8, bottom: Rgb8, steps: u32) -> Self {
        let steps = steps.max(2);
        let h1 = (steps - 1) as f32;
        let mut bytes = Vec::with_capacity(steps as usize * 4);
        for y in 0..steps {
            let t = (y as f32) / h1;
            let lerp = |a: u8, b: u8| -> u8 {
                let af = a as f32;
                let bf = b as f32;
                (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
            };
            bytes.extend_from_slice(&[
                lerp(top.r, bottom.r),
                lerp(top.g, bottom.g),
                lerp(top.b, bottom.b),
                255,
            ]);
        }
        Self {
            width: 1,
            height: steps,
            rgba8: Arc::new(bytes),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Raw straight-alpha bytes.
    pub fn rgba8(&self) -> &[u8] {
        self.rgba8.as_slice()
    }

    /// Iterate pixels as `[r, g, b, a]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.rgba8
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Resample to exactly `width × height` with a triangle filter.
    ///
    /// Filtering runs on premultiplied values, so fully transparent pixels contribute no color.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut premul = self.rgba8.as_ref().clone();
        premultiply_rgba8_in_place(&mut premul);
        // Length is validated at construction, so this only guards the type conversion.
        let Some(src) = image::RgbaImage::from_raw(self.width, self.height, premul) else {
            return self.clone();
        };
        let mut out =
            image::imageops::resize(&src, width, height, image::imageops::FilterType::Triangle)
                .into_raw();
        unpremultiply_rgba8_in_place(&mut out);
        Self {
            width,
            height,
            rgba8: Arc::new(out),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap.rs"]
mod tests;
