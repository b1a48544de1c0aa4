use rand::Rng;

use crate::assets::bitmap::Bitmap;
use crate::foundation::core::Rgb8;
use crate::palette::kmeans::kmeans;

/// Side of the square grid the source image is resampled to before clustering.
pub const SAMPLE_GRID: u32 = 80;
/// Lloyd iterations.
pub const ITERATIONS: usize = 8;
/// Pixels with alpha below this are ignored.
pub const MIN_ALPHA: u8 = 128;
/// Channel ceiling after tone mapping.
pub const MAX_CHANNEL: u8 = 245;

/// Where a palette came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteSource {
    /// Clustered from artwork pixels.
    Artwork,
    /// Fixed grayscale ramp (no artwork, or no visible pixels).
    Fallback,
}

/// Ordered accent colors, most prevalent first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Exactly `k` colors.
    pub colors: Vec<Rgb8>,
    /// Origin of `colors`.
    pub source: PaletteSource,
}

/// `k` evenly spaced grays from dark to light.
pub fn fallback_ramp(k: usize) -> Vec<Rgb8> {
    const DARK: f64 = 48.0;
    const LIGHT: f64 = 208.0;
    (0..k)
        .map(|i| {
            let t = if k > 1 { i as f64 / (k - 1) as f64 } else { 0.0 };
            let v = (DARK + (LIGHT - DARK) * t).round() as u8;
            Rgb8::new(v, v, v)
        })
        .collect()
}

/// Scale a color down so no channel exceeds [`MAX_CHANNEL`], preserving hue.
pub fn tone_map(c: Rgb8) -> Rgb8 {
    let max = c.max_channel();
    if max <= MAX_CHANNEL {
        return c;
    }
    let scale = f64::from(MAX_CHANNEL) / f64::from(max);
    let f = |v: u8| -> u8 { ((f64::from(v) * scale).floor() as u8).min(MAX_CHANNEL) };
    Rgb8::new(f(c.r), f(c.g), f(c.b))
}

fn visible_samples(image: &Bitmap) -> Vec<[f64; 3]> {
    let grid = image.resized(SAMPLE_GRID, SAMPLE_GRID);
    grid.pixels()
        .filter(|px| px[3] >= MIN_ALPHA)
        .map(|px| [f64::from(px[0]), f64::from(px[1]), f64::from(px[2])])
        .collect()
}

/// Extract exactly `k` accent colors from `image`.
///
/// Cluster seeding draws from `rng`, so unseeded callers get a valid but not necessarily
/// identical palette between runs. The population ordering property holds either way.
pub fn extract_palette<R: Rng + ?Sized>(image: &Bitmap, k: usize, rng: &mut R) -> Palette {
    let samples = visible_samples(image);
    let Some(clusters) = kmeans(&samples, k, ITERATIONS, rng) else {
        if k > 0 {
            tracing::warn!(
                width = image.width(),
                height = image.height(),
                "no visible pixels to sample, using fallback palette"
            );
        }
        return Palette {
            colors: fallback_ramp(k),
            source: PaletteSource::Fallback,
        };
    };

    let colors = clusters
        .sorted_by_population()
        .into_iter()
        .map(|(center, _)| {
            let ch = |v: f64| v.round().clamp(0.0, 255.0) as u8;
            tone_map(Rgb8::new(ch(center[0]), ch(center[1]), ch(center[2])))
        })
        .collect();

    Palette {
        colors,
        source: PaletteSource::Artwork,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/extract.rs"]
mod tests;
