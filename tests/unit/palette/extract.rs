use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> Bitmap {
    let data = rgba
        .iter()
        .copied()
        .cycle()
        .take((w * h * 4) as usize)
        .collect();
    Bitmap::from_rgba8(w, h, data).unwrap()
}

fn split(w: u32, h: u32, top: [u8; 4], bottom: [u8; 4], top_rows: u32) -> Bitmap {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let px = if y < top_rows { top } else { bottom };
        for _ in 0..w {
            data.extend_from_slice(&px);
        }
    }
    Bitmap::from_rgba8(w, h, data).unwrap()
}

#[test]
fn returns_exactly_k_colors_for_any_k() {
    let img = split(40, 40, [200, 30, 30, 255], [20, 40, 160, 255], 30);
    for k in 1..=8 {
        let mut rng = StdRng::seed_from_u64(k as u64);
        let p = extract_palette(&img, k, &mut rng);
        assert_eq!(p.colors.len(), k);
        assert_eq!(p.source, PaletteSource::Artwork);
    }
}

#[test]
fn fully_transparent_image_uses_fallback_ramp() {
    let img = solid(16, 16, [255, 0, 0, 0]);
    let mut rng = StdRng::seed_from_u64(1);
    let p = extract_palette(&img, 4, &mut rng);
    assert_eq!(p.source, PaletteSource::Fallback);
    assert_eq!(p.colors, fallback_ramp(4));
    assert_eq!(p.colors.len(), 4);
}

#[test]
fn fallback_ramp_is_gray_and_ascending() {
    let ramp = fallback_ramp(4);
    assert_eq!(ramp.len(), 4);
    for w in ramp.windows(2) {
        assert!(w[0].r < w[1].r);
    }
    assert!(ramp.iter().all(|c| c.r == c.g && c.g == c.b));
    assert_eq!(fallback_ramp(1).len(), 1);
    assert!(fallback_ramp(0).is_empty());
}

#[test]
fn no_channel_exceeds_ceiling_after_tone_mapping() {
    let img = split(20, 20, [255, 255, 255, 255], [250, 252, 240, 255], 10);
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = extract_palette(&img, 4, &mut rng);
        assert!(p.colors.iter().all(|c| c.max_channel() <= MAX_CHANNEL));
    }
}

#[test]
fn tone_map_preserves_dark_colors_and_scales_bright_ones() {
    assert_eq!(tone_map(Rgb8::new(10, 20, 30)), Rgb8::new(10, 20, 30));
    assert_eq!(tone_map(Rgb8::new(245, 0, 0)), Rgb8::new(245, 0, 0));
    let t = tone_map(Rgb8::new(255, 128, 0));
    assert_eq!(t.r, 245);
    assert_eq!(t.g, 122);
    assert_eq!(t.b, 0);
}

#[test]
fn most_prevalent_color_comes_first() {
    // Three quarters red, one quarter blue.
    let img = split(40, 40, [220, 20, 20, 255], [20, 20, 220, 255], 30);
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = extract_palette(&img, 2, &mut rng);
        let first = p.colors[0];
        assert!(first.r > first.b, "seed {seed}: {first:?}");
    }
}

#[test]
fn translucent_pixels_are_ignored() {
    let img = split(20, 20, [0, 200, 0, 60], [200, 0, 0, 255], 10);
    let mut rng = StdRng::seed_from_u64(5);
    let p = extract_palette(&img, 3, &mut rng);
    assert_eq!(p.source, PaletteSource::Artwork);
    assert!(p.colors[0].r > 150, "{:?}", p.colors);
    // Translucent green only reaches edge samples weighted by its alpha.
    assert!(p.colors.iter().all(|c| c.g <= 140), "{:?}", p.colors);
}

#[test]
fn transparent_pixels_do_not_tint_the_palette() {
    let img = split(20, 20, [0, 255, 0, 0], [200, 0, 0, 255], 10);
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = extract_palette(&img, 3, &mut rng);
        assert_eq!(p.source, PaletteSource::Artwork);
        assert!(p.colors.iter().all(|c| c.g == 0 && c.b == 0), "{:?}", p.colors);
    }
}
