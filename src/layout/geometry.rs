use crate::model::Variant;

/// Logical layout units per inch.
pub const UNITS_PER_INCH: f64 = 100.0;
/// Output resolution.
pub const DPI: u32 = 300;

/// Page size and coordinate mapping for one render, derived only from the variant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PosterGeometry {
    /// Layout branch the geometry was derived from.
    pub variant: Variant,
    /// Physical `(width, height)` in inches.
    pub size_inches: (f64, f64),
    /// Output dots per inch.
    pub dpi: u32,
}

impl PosterGeometry {
    /// Geometry for `variant`: Album 12 × 18 in, Track 8.5 × 11 in, both at 300 dpi.
    pub fn for_variant(variant: Variant) -> Self {
        let size_inches = match variant {
            Variant::Album => (12.0, 18.0),
            Variant::Track => (8.5, 11.0),
        };
        Self {
            variant,
            size_inches,
            dpi: DPI,
        }
    }

    /// Page width in logical units.
    pub fn width(&self) -> f64 {
        self.size_inches.0 * UNITS_PER_INCH
    }

    /// Page height in logical units.
    pub fn height(&self) -> f64 {
        self.size_inches.1 * UNITS_PER_INCH
    }

    /// Output size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.size_inches.0 * dpi).round() as u32,
            (self.size_inches.1 * dpi).round() as u32,
        )
    }

    /// Logical-to-pixel scale on each axis.
    pub fn scale(&self) -> (f64, f64) {
        let (pw, ph) = self.pixel_size();
        (f64::from(pw) / self.width(), f64::from(ph) / self.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
