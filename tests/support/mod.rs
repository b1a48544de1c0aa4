#![allow(dead_code)]

use std::collections::HashMap;

use sleeve::{
    Bitmap, FontSpec, ImageLoader, PosterError, PosterResult, Rect, Rgb8, Surface, TextAlign,
};

/// Advance per character as a fraction of the font size.
pub const CHAR_ADVANCE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Begin(f64, f64),
    Rect(Rect, Rgb8),
    Image {
        width: u32,
        height: u32,
        dest: Rect,
        radius: f64,
    },
    Text {
        text: String,
        x: f64,
        baseline: f64,
        font: FontSpec,
        color: Rgb8,
        align: TextAlign,
    },
    Finish,
}

/// Surface that records draw calls and measures text as fixed-advance glyphs.
pub struct RecordingSurface {
    pub size: (u32, u32),
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_op(&self, needle: &str) -> Option<&Op> {
        self.ops
            .iter()
            .find(|op| matches!(op, Op::Text { text, .. } if text.contains(needle)))
    }

    pub fn images(&self) -> Vec<(u32, u32, Rect, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image {
                    width,
                    height,
                    dest,
                    radius,
                } => Some((*width, *height, *dest, *radius)),
                _ => None,
            })
            .collect()
    }
}

pub fn measure(text: &str, font: &FontSpec) -> f64 {
    text.chars().count() as f64 * font.size * CHAR_ADVANCE
}

impl Surface for RecordingSurface {
    fn pixel_size(&self) -> (u32, u32) {
        self.size
    }

    fn begin(&mut self, scale_x: f64, scale_y: f64) -> PosterResult<()> {
        self.ops.clear();
        self.ops.push(Op::Begin(scale_x, scale_y));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb8) -> PosterResult<()> {
        self.ops.push(Op::Rect(rect, color));
        Ok(())
    }

    fn draw_image(&mut self, image: &Bitmap, dest: Rect, corner_radius: f64) -> PosterResult<()> {
        self.ops.push(Op::Image {
            width: image.width(),
            height: image.height(),
            dest,
            radius: corner_radius,
        });
        Ok(())
    }

    fn text_width(&mut self, text: &str, font: &FontSpec) -> PosterResult<f64> {
        Ok(measure(text, font))
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        baseline_y: f64,
        font: &FontSpec,
        color: Rgb8,
        align: TextAlign,
    ) -> PosterResult<()> {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            baseline: baseline_y,
            font: *font,
            color,
            align,
        });
        Ok(())
    }

    fn finish(&mut self) -> PosterResult<()> {
        self.ops.push(Op::Finish);
        Ok(())
    }
}

/// In-memory loader; unknown URLs fail like a broken link.
#[derive(Default)]
pub struct MemoryLoader {
    pub images: HashMap<String, Bitmap>,
    pub requested: Vec<String>,
}

impl MemoryLoader {
    pub fn with(mut self, url: &str, image: Bitmap) -> Self {
        self.images.insert(url.to_string(), image);
        self
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&mut self, url: &str) -> PosterResult<Bitmap> {
        self.requested.push(url.to_string());
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| PosterError::image_load(format!("no image at '{url}'")))
    }
}

/// Opaque image split into four equal horizontal stripes.
pub fn striped_cover(size: u32, colors: [Rgb8; 4]) -> Bitmap {
    let mut bytes = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        let c = colors[((y * 4) / size) as usize];
        for _ in 0..size {
            bytes.extend_from_slice(&[c.r, c.g, c.b, 255]);
        }
    }
    Bitmap::from_rgba8(size, size, bytes).unwrap()
}

pub fn solid(width: u32, height: u32, c: Rgb8) -> Bitmap {
    let px = [c.r, c.g, c.b, 255];
    Bitmap::from_rgba8(width, height, px.repeat((width * height) as usize)).unwrap()
}

pub const ABBEY_ROAD_TRACKS: [&str; 17] = [
    "Come Together",
    "Something",
    "Maxwell's Silver Hammer",
    "Oh! Darling",
    "Octopus's Garden",
    "I Want You (She's So Heavy)",
    "Here Comes The Sun",
    "Because",
    "You Never Give Me Your Money",
    "Sun King",
    "Mean Mr. Mustard",
    "Polythene Pam",
    "She Came In Through The Bathroom Window",
    "Golden Slumbers",
    "Carry That Weight",
    "The End",
    "Her Majesty",
];
