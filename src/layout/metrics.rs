use crate::foundation::core::Rgb8;
use crate::layout::geometry::PosterGeometry;
use crate::model::Variant;
use crate::text::wrap::TitleStyle;

/// Page background.
pub const BACKGROUND: Rgb8 = Rgb8::WHITE;
/// Title ink.
pub const TITLE_INK: Rgb8 = Rgb8::BLACK;
/// Artist line ink.
pub const ARTIST_INK: Rgb8 = Rgb8::from_hex(0x444444);
/// Right-slot labels, captions and the release-date line.
pub const LABEL_INK: Rgb8 = Rgb8::from_hex(0x555555);
/// Tracklist header and rows.
pub const TRACK_INK: Rgb8 = Rgb8::from_hex(0x333333);
/// Footer and attribution.
pub const FOOTER_INK: Rgb8 = Rgb8::from_hex(0x777777);
/// Top of the gradient that replaces missing artwork.
pub const FALLBACK_COVER_TOP: Rgb8 = Rgb8::from_hex(0x021427);
/// Bottom of the gradient that replaces missing artwork.
pub const FALLBACK_COVER_BOTTOM: Rgb8 = Rgb8::from_hex(0x08254f);

/// Number of accent colors in the color bar.
pub const PALETTE_SIZE: usize = 4;
/// Joins packed track names on one tracklist row.
pub const TRACK_SEPARATOR: &str = "  |  ";
/// Baseline-to-bottom allowance for a line of text, as a fraction of its size.
pub const DESCENT: f64 = 0.25;
/// Line advance for single-line text blocks, as a multiple of size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Layout constants for one variant, in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Page width.
    pub page_width: f64,
    /// Page height.
    pub page_height: f64,
    /// Left and right page margin.
    pub margin: f64,
    /// Cover mask corner radius.
    pub corner_radius: f64,
    /// Cover height when no artwork is available.
    pub fallback_cover_height: f64,
    /// Width of the right-hand slot holding the scan code or labels.
    pub slot_width: f64,
    /// Gap between the text column and the right-hand slot.
    pub slot_gap: f64,
    /// Scan code bounding box height; its width is `slot_width`.
    pub code_box_height: f64,
    /// Space between the cover and the title band.
    pub band_gap: f64,
    /// Title sizes.
    pub title: TitleStyle,
    /// Space between the title block and the artist line.
    pub artist_gap: f64,
    /// Artist line size.
    pub artist_size: f64,
    /// Right-slot label size.
    pub label_size: f64,
    /// Scan code caption size.
    pub caption_size: f64,
    /// Distance from the code box bottom to the caption baseline.
    pub caption_gap: f64,
    /// Height of the color bar.
    pub bar_height: f64,
    /// Album: space above the color bar. Track: distance from the bar bottom to the page bottom.
    pub bar_offset: f64,
    /// Attribution size.
    pub attribution_size: f64,
    /// Distance from the attribution baseline to the page bottom.
    pub attribution_inset: f64,
    /// Album-only constants.
    pub album: AlbumMetrics,
    /// Track-only constants.
    pub track: TrackMetrics,
}

/// Tracklist and footer constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlbumMetrics {
    /// Color bar bottom to the duration baseline.
    pub duration_gap: f64,
    /// Duration size.
    pub duration_size: f64,
    /// Space between the duration and the tracklist header.
    pub tracklist_gap: f64,
    /// Header size.
    pub header_size: f64,
    /// Header baseline to first row baseline.
    pub first_row_gap: f64,
    /// Row size.
    pub row_size: f64,
    /// Row baseline spacing.
    pub row_spacing: f64,
    /// Footer size.
    pub footer_size: f64,
    /// Footer line spacing.
    pub footer_spacing: f64,
    /// Lowest footer baseline, measured from the page bottom.
    pub footer_inset: f64,
    /// Minimum gap between the cursor and the footer baseline.
    pub footer_gap: f64,
    /// Space kept free between the last tracklist row and the lowest footer baseline.
    pub footer_reserve: f64,
}

/// Release-date line constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackMetrics {
    /// Artist bottom to release-date baseline.
    pub release_gap: f64,
}

impl LayoutMetrics {
    /// Constants for `geometry`'s variant.
    pub fn for_geometry(geometry: &PosterGeometry) -> Self {
        let page_width = geometry.width();
        let page_height = geometry.height();
        let shared = |title: TitleStyle,
                      band_gap: f64,
                      artist_gap: f64,
                      artist_size: f64,
                      label_size: f64,
                      bar_offset: f64| Self {
            page_width,
            page_height,
            margin: page_width * 0.06,
            corner_radius: page_width * 0.02,
            fallback_cover_height: page_height * 0.6,
            slot_width: 300.0,
            slot_gap: 25.0,
            code_box_height: 100.0,
            band_gap,
            title,
            artist_gap,
            artist_size,
            label_size,
            caption_size: 13.0,
            caption_gap: 20.0,
            bar_height: 12.0,
            bar_offset,
            attribution_size: 11.0,
            attribution_inset: 30.0,
            album: AlbumMetrics {
                duration_gap: 40.0,
                duration_size: 20.0,
                tracklist_gap: 40.0,
                header_size: 22.0,
                first_row_gap: 36.0,
                row_size: 18.0,
                row_spacing: 30.0,
                footer_size: 18.0,
                footer_spacing: 30.0,
                footer_inset: 80.0,
                footer_gap: 40.0,
                footer_reserve: 60.0,
            },
            track: TrackMetrics { release_gap: 30.0 },
        };

        match geometry.variant {
            Variant::Album => shared(
                TitleStyle {
                    base_size: 52.0,
                    compact_size: 36.0,
                    line_height: 1.15,
                },
                35.0,
                10.0,
                30.0,
                18.0,
                30.0,
            ),
            Variant::Track => shared(
                TitleStyle {
                    base_size: 42.0,
                    compact_size: 30.0,
                    line_height: 1.15,
                },
                25.0,
                6.0,
                24.0,
                15.0,
                75.0,
            ),
        }
    }

    /// Right edge of the content column.
    pub fn right_edge(&self) -> f64 {
        self.page_width - self.margin
    }

    /// Width between the margins.
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Width available to the title and artist line beside the right-hand slot.
    pub fn text_width(&self) -> f64 {
        self.content_width() - self.slot_width - self.slot_gap
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/metrics.rs"]
mod tests;
