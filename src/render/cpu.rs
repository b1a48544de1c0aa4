use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::assets::bitmap::Bitmap;
use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::render::fonts::{FontFace, FontSet};
use crate::render::surface::{FontSpec, FontWeight, Surface, TextAlign};

/// Largest bitmap edge uploaded as a paint; bigger sources are downsampled first.
const MAX_PAINT_EDGE: u32 = 8_192;

/// Straight-alpha RGBA8 pixels read back from a [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct RasterRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed, row-major RGBA8 bytes.
    pub data: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct TextBrush;

struct LoadedFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    regular: Option<LoadedFace>,
    bold: Option<LoadedFace>,
}

impl TextShaper {
    fn new(fonts: &FontSet) -> PosterResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut register = |face: Option<&FontFace>| -> PosterResult<Option<LoadedFace>> {
            let Some(face) = face else {
                return Ok(None);
            };
            let families = font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(face.bytes.as_ref().clone()),
                None,
            );
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PosterError::render("no font families registered from font bytes")
            })?;
            let family = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| PosterError::render("registered font family has no name"))?
                .to_string();
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                face.index,
            );
            Ok(Some(LoadedFace { family, font }))
        };

        let regular_face = fonts.face(FontWeight::Regular);
        let regular = register(regular_face)?;
        // `FontSet` hands back the regular face when bold is missing.
        let bold_face = fonts
            .face(FontWeight::Bold)
            .filter(|b| !regular_face.is_some_and(|r| Arc::ptr_eq(&r.bytes, &b.bytes)));
        let bold = register(bold_face)?;

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular,
            bold,
        })
    }

    fn face(&self, weight: FontWeight) -> PosterResult<&LoadedFace> {
        let face = match weight {
            FontWeight::Regular => self.regular.as_ref(),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        };
        face.ok_or_else(|| PosterError::render("no font face loaded for text"))
    }

    fn layout(
        &mut self,
        text: &str,
        font: &FontSpec,
    ) -> PosterResult<(parley::Layout<TextBrush>, vello_cpu::peniko::FontData)> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(PosterError::render("font size must be finite and > 0"));
        }
        let (family, data) = {
            let face = self.face(font.weight)?;
            (face.family.clone(), face.font.clone())
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size as f32));
        if font.weight == FontWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok((layout, data))
    }
}

/// CPU raster surface backed by `vello_cpu`, with `parley` text shaping.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
    transform: vello_cpu::kurbo::Affine,
    shaper: TextShaper,
}

impl CpuSurface {
    /// Allocate a transparent `width × height` surface.
    pub fn new(width: u32, height: u32, fonts: &FontSet) -> PosterResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| PosterError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| PosterError::render("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(PosterError::render("surface must be at least 1x1"));
        }
        Ok(Self {
            width: width_u16,
            height: height_u16,
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            transform: vello_cpu::kurbo::Affine::IDENTITY,
            shaper: TextShaper::new(fonts)?,
        })
    }

    /// Read back the committed pixels as straight-alpha RGBA8.
    pub fn to_rgba8(&self) -> RasterRGBA {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        RasterRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        }
    }
}

impl Surface for CpuSurface {
    fn pixel_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn begin(&mut self, scale_x: f64, scale_y: f64) -> PosterResult<()> {
        if !(scale_x.is_finite() && scale_y.is_finite() && scale_x > 0.0 && scale_y > 0.0) {
            return Err(PosterError::render("surface scale must be finite and > 0"));
        }
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.transform = vello_cpu::kurbo::Affine::scale_non_uniform(scale_x, scale_y);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb8) -> PosterResult<()> {
        self.ctx.set_transform(self.transform);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn draw_image(&mut self, image: &Bitmap, dest: Rect, corner_radius: f64) -> PosterResult<()> {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let paint = bitmap_to_image(image)?;
        let (iw, ih) = image_paint_size(&paint)?;

        self.ctx.set_transform(self.transform);
        self.ctx.set_paint_transform(
            vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih),
        );
        self.ctx.set_paint(paint);

        let shape = rect_to_cpu(dest);
        if corner_radius > 0.0 {
            let path = vello_cpu::kurbo::RoundedRect::from_rect(shape, corner_radius).to_path(0.1);
            self.ctx.fill_path(&path);
        } else {
            self.ctx.fill_rect(&shape);
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn text_width(&mut self, text: &str, font: &FontSpec) -> PosterResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let (layout, _) = self.shaper.layout(text, font)?;
        Ok(f64::from(layout.width()))
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
        if text.is_empty() {
            return Ok(());
        }
        let (layout, font_data) = self.shaper.layout(text, font)?;
        let width = f64::from(layout.width());
        let ascent = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Right => x - width,
        };

        self.ctx.set_transform(
            self.transform * vello_cpu::kurbo::Affine::translate((left, baseline_y - ascent)),
        );
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> PosterResult<()> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bitmap_to_image(image: &Bitmap) -> PosterResult<vello_cpu::Image> {
    let fitted;
    let image = if image.width() > MAX_PAINT_EDGE || image.height() > MAX_PAINT_EDGE {
        let scale = f64::from(MAX_PAINT_EDGE) / f64::from(image.width().max(image.height()));
        let w = ((f64::from(image.width()) * scale).round() as u32).max(1);
        let h = ((f64::from(image.height()) * scale).round() as u32).max(1);
        fitted = image.resized(w, h);
        &fitted
    } else {
        image
    };

    let mut bytes = image.rgba8().to_vec();
    premultiply_rgba8_in_place(&mut bytes);
    let pixmap = pixmap_from_premul_bytes(&bytes, image.width(), image.height())?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosterError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosterError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PosterError::render("pixmap byte len mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn image_paint_size(image: &vello_cpu::Image) -> PosterResult<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Ok((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => Err(PosterError::render(
            "cpu surface does not support opaque image ids",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
