use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PosterError, PosterResult};

/// Poster layout branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// 12 × 18 in, with tracklist and footer.
    Album,
    /// 8.5 × 11 in, no tracklist.
    Track,
}

/// Normalized, render-ready description of one poster.
///
/// Built either directly from JSON or from catalog records via
/// [`PosterDescription::from_catalog_album`] / [`PosterDescription::from_catalog_track`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PosterDescription {
    /// Layout branch.
    pub variant: Variant,
    /// Album or track name.
    pub title: String,
    /// Artist names in display order, joined with `", "`.
    pub artist_names: Vec<String>,
    /// Cover artwork location; `None` draws the fallback fill and palette.
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// Album: sum over tracks. Track: its own duration.
    pub total_duration_ms: u64,
    /// Displayed verbatim.
    #[serde(default)]
    pub release_date: String,
    /// Omitted from the footer when absent or empty.
    #[serde(default)]
    pub record_label: Option<String>,
    /// Album only; absent or empty omits the tracklist block.
    #[serde(default)]
    pub track_names: Option<Vec<String>>,
    /// Opaque catalog identifier used to request a scan code.
    #[serde(default)]
    pub catalog_uri: Option<String>,
    /// Whether to render a scan code in the right-hand slot.
    #[serde(default)]
    pub show_scan_code: bool,
    /// Small caption rendered under the scan code.
    #[serde(default)]
    pub code_caption: Option<String>,
}

impl PosterDescription {
    /// Parse a description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PosterResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PosterError::serde(format!("parse poster description JSON: {e}")))
    }

    /// Parse a description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PosterError::validation(format!(
                "open poster description '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject descriptions the layout engine cannot render meaningfully.
    pub fn validate(&self) -> PosterResult<()> {
        if self.title.trim().is_empty() {
            return Err(PosterError::validation("poster title must be non-empty"));
        }
        if self.artist_names.iter().all(|a| a.trim().is_empty()) {
            return Err(PosterError::validation(
                "poster needs at least one non-empty artist name",
            ));
        }
        if let Some(url) = &self.cover_image_url
            && url.trim().is_empty()
        {
            return Err(PosterError::validation(
                "cover_image_url must be omitted rather than empty",
            ));
        }
        Ok(())
    }

    /// Artist names joined for display.
    pub fn artist_line(&self) -> String {
        self.artist_names
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Track names to render, or `None` when the tracklist block is omitted.
    pub fn tracklist(&self) -> Option<&[String]> {
        if self.variant != Variant::Album {
            return None;
        }
        self.track_names
            .as_deref()
            .filter(|names| !names.is_empty())
    }

    /// Record label to render, or `None` when omitted from the footer.
    pub fn label(&self) -> Option<&str> {
        self.record_label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Catalog identifier when a scan code should be requested.
    pub fn scan_code_uri(&self) -> Option<&str> {
        if !self.show_scan_code {
            return None;
        }
        self.catalog_uri
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
