use rand::RngCore;

use crate::assets::bitmap::Bitmap;
use crate::assets::loader::ImageLoader;
use crate::config::RenderSettings;
use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::layout::compositor::{place_cover_image, place_scan_code};
use crate::layout::geometry::PosterGeometry;
use crate::layout::metrics::{
    ARTIST_INK, BACKGROUND, DESCENT, FOOTER_INK, LABEL_INK, LINE_HEIGHT, LayoutMetrics,
    PALETTE_SIZE, TITLE_INK, TRACK_INK, TRACK_SEPARATOR,
};
use crate::model::{PosterDescription, Variant};
use crate::palette::extract::{Palette, PaletteSource, extract_palette, fallback_ramp};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::text::format::format_duration;
use crate::text::wrap::{ELLIPSIS, fit_title, pack_tokens, truncate_to_width, wrap_words};

/// Everything one render needs to know, built fresh per call.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Poster content.
    pub description: &'a PosterDescription,
    /// Presentation settings.
    pub settings: &'a RenderSettings,
    /// Page size for the description's variant.
    pub geometry: PosterGeometry,
    /// Layout constants for the description's variant.
    pub metrics: LayoutMetrics,
}

impl<'a> RenderContext<'a> {
    /// Derive geometry and metrics from `description.variant`.
    pub fn new(description: &'a PosterDescription, settings: &'a RenderSettings) -> Self {
        let geometry = PosterGeometry::for_variant(description.variant);
        Self {
            description,
            settings,
            geometry,
            metrics: LayoutMetrics::for_geometry(&geometry),
        }
    }
}

/// Running vertical offset. It never moves up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    /// Cursor at the top of the page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Move down to `y` if it is below the current offset.
    pub fn advance_to(&mut self, y: f64) -> f64 {
        self.y = self.y.max(y);
        self.y
    }
}

/// Kind of a placed layout block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Page fill.
    Background,
    /// Artwork or fallback gradient.
    Cover,
    /// Title lines.
    Title,
    /// Artist line.
    Artist,
    /// Scan code with caption, or the fallback labels.
    RightCaption,
    /// Palette segments.
    ColorBar,
    /// Album running time under the color bar.
    Duration,
    /// Tracklist header and rows.
    Tracklist,
    /// Album footer.
    Footer,
    /// Track release-date line.
    ReleaseDate,
    /// Bottom-right attribution.
    Attribution,
}

impl BlockKind {
    /// `true` for blocks placed by the cursor, which never overlap each other.
    pub fn is_stacked(self) -> bool {
        !matches!(
            self,
            Self::Background | Self::RightCaption | Self::Attribution
        )
    }
}

/// Vertical extent of one block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlacedBlock {
    /// What was placed.
    pub kind: BlockKind,
    /// Top edge in logical units.
    pub top: f64,
    /// Bottom edge in logical units.
    pub bottom: f64,
}

/// An element that was replaced by its fallback.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Cover failed to load; the gradient and fallback palette were used.
    CoverImage(String),
    /// Scan code failed to load; the text labels were used.
    ScanCode(String),
}

/// Where everything landed in one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderReport {
    /// Page geometry used.
    pub geometry: PosterGeometry,
    /// Color bar colors, most prevalent first.
    pub palette: Vec<Rgb8>,
    /// Origin of `palette`.
    pub palette_source: PaletteSource,
    /// Placed blocks in drawing order.
    pub blocks: Vec<PlacedBlock>,
    /// Color bar segments, left to right.
    pub color_bar: Vec<(Rect, Rgb8)>,
    /// Tracklist rows as drawn.
    pub tracklist_lines: Vec<String>,
    /// Elements that fell back.
    pub degraded: Vec<Degradation>,
}

impl RenderReport {
    /// First block of `kind`.
    pub fn block(&self, kind: BlockKind) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    /// Cursor-placed blocks in placement order.
    pub fn stacked_blocks(&self) -> impl Iterator<Item = &PlacedBlock> + '_ {
        self.blocks.iter().filter(|b| b.kind.is_stacked())
    }
}

/// Lay out and paint `description` into `surface`.
///
/// The surface must already be sized to the variant's pixel size. It is cleared first, so a
/// failed render leaves a partially painted surface the caller should discard. Cover and scan
/// code load failures only degrade their own element and are listed in
/// [`RenderReport::degraded`]. Palette seeding draws from `rng`.
#[tracing::instrument(
    skip_all,
    fields(variant = ?description.variant, title = %description.title)
)]
pub fn render_poster(
    description: &PosterDescription,
    surface: &mut dyn Surface,
    loader: &mut dyn ImageLoader,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> PosterResult<RenderReport> {
    description.validate()?;
    settings.validate()?;
    let ctx = RenderContext::new(description, settings);

    let expected = ctx.geometry.pixel_size();
    let actual = surface.pixel_size();
    if actual != expected {
        return Err(PosterError::validation(format!(
            "surface is {}x{} px, {:?} poster needs {}x{} px",
            actual.0, actual.1, description.variant, expected.0, expected.1
        )));
    }

    let (sx, sy) = ctx.geometry.scale();
    surface.begin(sx, sy)?;

    let mut pass = Pass {
        ctx,
        surface,
        loader,
        cursor: Cursor::new(),
        report: RenderReport {
            geometry: ctx.geometry,
            palette: Vec::new(),
            palette_source: PaletteSource::Fallback,
            blocks: Vec::new(),
            color_bar: Vec::new(),
            tracklist_lines: Vec::new(),
            degraded: Vec::new(),
        },
    };

    pass.background()?;
    pass.cover(rng)?;
    match description.variant {
        Variant::Album => pass.album()?,
        Variant::Track => pass.track()?,
    }
    pass.attribution()?;
    pass.surface.finish()?;

    tracing::debug!(
        blocks = pass.report.blocks.len(),
        degraded = pass.report.degraded.len(),
        "poster rendered"
    );
    Ok(pass.report)
}

/// Title band geometry, computed before any of its parts are drawn.
#[derive(Clone, Copy, Debug)]
struct Band {
    top: f64,
    title_bottom: f64,
    artist_top: f64,
    artist_bottom: f64,
}

impl Band {
    fn center(&self) -> f64 {
        (self.top + self.artist_bottom) / 2.0
    }
}

struct Pass<'a, 's> {
    ctx: RenderContext<'a>,
    surface: &'s mut dyn Surface,
    loader: &'s mut dyn ImageLoader,
    cursor: Cursor,
    report: RenderReport,
}

impl Pass<'_, '_> {
    fn metrics(&self) -> &LayoutMetrics {
        &self.ctx.metrics
    }

    fn place(&mut self, kind: BlockKind, top: f64, bottom: f64) {
        if kind.is_stacked() {
            self.cursor.advance_to(bottom);
        }
        self.report.blocks.push(PlacedBlock { kind, top, bottom });
    }

    fn text(
        &mut self,
        text: &str,
        x: f64,
        baseline: f64,
        font: FontSpec,
        color: Rgb8,
        align: TextAlign,
    ) -> PosterResult<()> {
        self.surface
            .fill_text(text, x, baseline, &font, color, align)
    }

    fn fit(&mut self, text: &str, max_width: f64, font: FontSpec) -> PosterResult<String> {
        let surface = &mut *self.surface;
        truncate_to_width(text, max_width, |s| surface.text_width(s, &font))
    }

    fn background(&mut self) -> PosterResult<()> {
        let m = *self.metrics();
        self.surface.fill_rect(
            Rect::new(0.0, 0.0, m.page_width, m.page_height),
            BACKGROUND,
        )?;
        self.place(BlockKind::Background, 0.0, m.page_height);
        Ok(())
    }

    fn cover(&mut self, rng: &mut dyn RngCore) -> PosterResult<()> {
        let artwork = self.load_cover();
        let palette = match &artwork {
            Some(image) => extract_palette(image, PALETTE_SIZE, rng),
            None => Palette {
                colors: fallback_ramp(PALETTE_SIZE),
                source: PaletteSource::Fallback,
            },
        };
        self.report.palette = palette.colors;
        self.report.palette_source = palette.source;

        let m = *self.metrics();
        let rect = place_cover_image(&mut *self.surface, artwork.as_ref(), &m)?;
        self.place(BlockKind::Cover, rect.y0, rect.y1);
        Ok(())
    }

    fn load_cover(&mut self) -> Option<Bitmap> {
        let desc = self.ctx.description;
        let url = desc.cover_image_url.as_deref()?;
        match self.loader.load(url) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(url, error = %e, "cover image unavailable, using fallback");
                self.report
                    .degraded
                    .push(Degradation::CoverImage(e.to_string()));
                None
            }
        }
    }

    fn band(&self) -> Band {
        let m = self.metrics();
        let top = self.cursor.y() + m.band_gap;
        let title_bottom = top + m.title.reserved_height();
        let artist_top = title_bottom + m.artist_gap;
        Band {
            top,
            title_bottom,
            artist_top,
            artist_bottom: artist_top + m.artist_size * LINE_HEIGHT,
        }
    }

    fn title(&mut self, band: &Band) -> PosterResult<()> {
        let m = *self.metrics();
        let max_width = m.text_width();
        let surface = &mut *self.surface;
        let fitted = fit_title(
            &self.ctx.description.title,
            &m.title,
            Some(max_width),
            |s, size| surface.text_width(s, &FontSpec::bold(size)),
        )?;

        let font = FontSpec::bold(fitted.font_size);
        for (i, line) in fitted.lines.iter().enumerate() {
            let fitted_line = self.fit(line, max_width, font)?;
            if fitted_line != *line {
                tracing::warn!(
                    line = i + 1,
                    text = %line,
                    "title line wider than the column, truncating"
                );
            }
            let line = fitted_line;
            let baseline =
                band.top + fitted.font_size * (1.0 + i as f64 * m.title.line_height);
            self.text(&line, m.margin, baseline, font, TITLE_INK, TextAlign::Left)?;
        }
        tracing::debug!(
            lines = fitted.lines.len(),
            size = fitted.font_size,
            "placed title"
        );
        self.place(BlockKind::Title, band.top, band.title_bottom);
        Ok(())
    }

    fn artist(&mut self, band: &Band) -> PosterResult<()> {
        let m = *self.metrics();
        let font = FontSpec::regular(m.artist_size);
        let line = self.fit(&self.ctx.description.artist_line(), m.text_width(), font)?;
        self.text(
            &line,
            m.margin,
            band.artist_top + m.artist_size,
            font,
            ARTIST_INK,
            TextAlign::Left,
        )?;
        self.place(BlockKind::Artist, band.artist_top, band.artist_bottom);
        Ok(())
    }

    /// Scan code and caption when enabled and loadable, otherwise `labels` stacked and centered
    /// on the band. Returns the bottom of whatever was drawn.
    fn right_slot(&mut self, band: &Band, labels: &[String]) -> PosterResult<f64> {
        let m = *self.metrics();
        let right = m.right_edge();
        let center = band.center();

        let desc = self.ctx.description;
        if let Some(uri) = desc.scan_code_uri() {
            let url = self.ctx.settings.scan_code_url(uri);
            match self.loader.load(&url) {
                Ok(code) => {
                    let bounds = Rect::new(
                        right - m.slot_width,
                        center - m.code_box_height / 2.0,
                        right,
                        center + m.code_box_height / 2.0,
                    );
                    let drawn = place_scan_code(&mut *self.surface, &code, bounds)?;
                    let mut bottom = drawn.y1;
                    if let Some(caption) = self.caption() {
                        bottom = self.caption_lines(&caption, bounds.y1 + m.caption_gap)?;
                    }
                    self.place(BlockKind::RightCaption, drawn.y0, bottom);
                    return Ok(bottom);
                }
                Err(e) => {
                    tracing::warn!(uri, error = %e, "scan code unavailable, drawing labels");
                    self.report
                        .degraded
                        .push(Degradation::ScanCode(e.to_string()));
                }
            }
        }

        let font = FontSpec::regular(m.label_size);
        let step = m.label_size * 1.4;
        let height = m.label_size + step * labels.len().saturating_sub(1) as f64;
        let top = center - height / 2.0;
        let mut baseline = top + m.label_size;
        for label in labels {
            let label = self.fit(label, m.slot_width, font)?;
            self.text(&label, right, baseline, font, LABEL_INK, TextAlign::Right)?;
            baseline += step;
        }
        let bottom = top + height + m.label_size * DESCENT;
        self.place(BlockKind::RightCaption, top, bottom);
        Ok(bottom)
    }

    /// Word-wrap `caption` to the slot width, right-aligned, first baseline at `baseline`.
    /// Returns the bottom of the last line.
    fn caption_lines(&mut self, caption: &str, baseline: f64) -> PosterResult<f64> {
        let m = *self.metrics();
        let font = FontSpec::regular(m.caption_size);
        let surface = &mut *self.surface;
        let lines = wrap_words(caption, m.slot_width, |s| surface.text_width(s, &font))?;

        let step = m.caption_size * LINE_HEIGHT;
        let mut last = baseline;
        for (i, line) in lines.iter().enumerate() {
            // Only a single word wider than the slot still needs shortening.
            let line = self.fit(line, m.slot_width, font)?;
            last = baseline + step * i as f64;
            self.text(&line, m.right_edge(), last, font, LABEL_INK, TextAlign::Right)?;
        }
        Ok(last + m.caption_size * DESCENT)
    }

    fn caption(&self) -> Option<String> {
        let caption = self.ctx.description.code_caption.as_deref()?.trim();
        if caption.is_empty() {
            return None;
        }
        Some(if self.ctx.settings.quote_caption {
            format!("\"{caption}\"")
        } else {
            caption.to_string()
        })
    }

    fn color_bar(&mut self, top: f64) -> PosterResult<()> {
        let m = *self.metrics();
        let colors = self.report.palette.clone();
        let n = colors.len().max(1) as f64;
        let segment = m.content_width() / n;
        let bottom = top + m.bar_height;
        for (i, color) in colors.into_iter().enumerate() {
            let x0 = m.margin + segment * i as f64;
            let rect = Rect::new(x0, top, x0 + segment, bottom);
            self.surface.fill_rect(rect, color)?;
            self.report.color_bar.push((rect, color));
        }
        self.place(BlockKind::ColorBar, top, bottom);
        Ok(())
    }

    fn album(&mut self) -> PosterResult<()> {
        let band = self.band();
        let by = format!(
            "ALBUM BY {}",
            self.ctx.description.artist_line().to_uppercase()
        );

        self.title(&band)?;
        self.artist(&band)?;
        let slot_bottom = self.right_slot(&band, &[by])?;
        self.cursor.advance_to(slot_bottom);

        let bar_top = self.cursor.y() + self.metrics().bar_offset;
        self.color_bar(bar_top)?;
        self.duration()?;
        self.tracklist()?;
        self.footer()
    }

    fn duration(&mut self) -> PosterResult<()> {
        let m = *self.metrics();
        let a = m.album;
        let baseline = self.cursor.y() + a.duration_gap;
        let text = format_duration(self.ctx.description.total_duration_ms);
        self.text(
            &text,
            m.right_edge(),
            baseline,
            FontSpec::regular(a.duration_size),
            TRACK_INK,
            TextAlign::Right,
        )?;
        self.place(
            BlockKind::Duration,
            baseline - a.duration_size,
            baseline + a.duration_size * DESCENT,
        );
        Ok(())
    }

    /// Header and packed rows; nothing at all without track names.
    fn tracklist(&mut self) -> PosterResult<()> {
        let m = *self.metrics();
        let a = m.album;
        let desc = self.ctx.description;
        let Some(tracks) = desc.tracklist() else {
            return Ok(());
        };

        let top = self.cursor.y() + a.tracklist_gap;
        let header_baseline = top + a.header_size;
        self.text(
            "TRACKLIST",
            m.margin,
            header_baseline,
            FontSpec::bold(a.header_size),
            TRACK_INK,
            TextAlign::Left,
        )?;
        let mut bottom = header_baseline + a.header_size * DESCENT;

        let font = FontSpec::regular(a.row_size);
        let surface = &mut *self.surface;
        let mut lines = pack_tokens(
            tracks.iter().map(|t| t.trim()).filter(|t| !t.is_empty()),
            TRACK_SEPARATOR,
            m.content_width(),
            |s| surface.text_width(s, &font),
        )?;

        let first = header_baseline + a.first_row_gap;
        let lowest = m.page_height - a.footer_inset - a.footer_reserve;
        let fits = if first > lowest {
            0
        } else {
            (((lowest - first) / a.row_spacing).floor() as usize + 1).min(lines.len())
        };
        if fits < lines.len() {
            tracing::warn!(
                rows = lines.len(),
                kept = fits,
                "tracklist does not fit above the footer, truncating"
            );
            lines.truncate(fits);
            if let Some(last) = lines.pop() {
                let marked = format!("{last} {ELLIPSIS}");
                lines.push(self.fit(&marked, m.content_width(), font)?);
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let baseline = first + a.row_spacing * i as f64;
            self.text(line, m.margin, baseline, font, TRACK_INK, TextAlign::Left)?;
            bottom = baseline + a.row_size * DESCENT;
        }
        self.report.tracklist_lines = lines;

        self.place(BlockKind::Tracklist, top, bottom);
        Ok(())
    }

    fn footer(&mut self) -> PosterResult<()> {
        let m = *self.metrics();
        let a = m.album;
        let desc = self.ctx.description;
        let settings = self.ctx.settings;
        let font = FontSpec::regular(a.footer_size);
        let right = m.right_edge();

        let baseline = (m.page_height - a.footer_inset).max(self.cursor.y() + a.footer_gap);
        let mut credit_width = 0.0;
        if !settings.generator_credit.trim().is_empty() {
            let credit = self.fit(settings.generator_credit.trim(), m.slot_width, font)?;
            credit_width = self.surface.text_width(&credit, &font)? + m.slot_gap;
            self.text(&credit, right, baseline, font, FOOTER_INK, TextAlign::Right)?;
        }

        let release = format!("RELEASE DATE: {}", desc.release_date.trim());
        let release = self.fit(&release, m.content_width() - credit_width, font)?;
        self.text(&release, m.margin, baseline, font, FOOTER_INK, TextAlign::Left)?;

        let mut last = baseline;
        if let Some(label) = desc.label() {
            last += a.footer_spacing;
            let label = self.fit(&format!("RECORD LABEL: {label}"), m.content_width(), font)?;
            self.text(&label, m.margin, last, font, FOOTER_INK, TextAlign::Left)?;
        }
        self.place(
            BlockKind::Footer,
            baseline - a.footer_size,
            last + a.footer_size * DESCENT,
        );
        Ok(())
    }

    fn track(&mut self) -> PosterResult<()> {
        let band = self.band();
        let desc = self.ctx.description;
        let labels = [
            format!("SONG BY {}", desc.artist_line().to_uppercase()),
            format_duration(desc.total_duration_ms),
        ];

        let slot_bottom = self.right_slot(&band, &labels)?;
        self.title(&band)?;
        self.artist(&band)?;
        self.release_date()?;
        self.cursor.advance_to(slot_bottom);

        let m = *self.metrics();
        let anchored = m.page_height - m.bar_offset - m.bar_height;
        self.color_bar(anchored.max(self.cursor.y()))
    }

    fn release_date(&mut self) -> PosterResult<()> {
        let m = *self.metrics();
        let desc = self.ctx.description;
        let date = desc.release_date.trim();
        if date.is_empty() {
            return Ok(());
        }
        let font = FontSpec::regular(m.label_size);
        let baseline = self.cursor.y() + m.track.release_gap;
        let line = self.fit(&format!("RELEASE DATE: {date}"), m.text_width(), font)?;
        self.text(&line, m.margin, baseline, font, LABEL_INK, TextAlign::Left)?;
        self.place(
            BlockKind::ReleaseDate,
            baseline - m.label_size,
            baseline + m.label_size * DESCENT,
        );
        Ok(())
    }

    fn attribution(&mut self) -> PosterResult<()> {
        let m = *self.metrics();
        let settings = self.ctx.settings;
        let text = settings.attribution.trim();
        if text.is_empty() {
            return Ok(());
        }
        let font = FontSpec::regular(m.attribution_size);
        let baseline = m.page_height - m.attribution_inset;
        let text = self.fit(text, m.content_width(), font)?;
        self.text(
            &text,
            m.right_edge(),
            baseline,
            font,
            FOOTER_INK,
            TextAlign::Right,
        )?;
        self.place(
            BlockKind::Attribution,
            baseline - m.attribution_size,
            baseline + m.attribution_size * DESCENT,
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
