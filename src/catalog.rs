//! Normalization of catalog album/track JSON into [`PosterDescription`].
//!
//! Only the fields the poster uses are modeled; everything else in the catalog payload is
//! ignored.

use std::fmt;

use crate::foundation::error::{PosterError, PosterResult};
use crate::model::{PosterDescription, Variant};

/// Artist reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogArtist {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// One artwork rendition.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogImage {
    /// Image URL.
    pub url: String,
    /// Pixel width, when reported.
    #[serde(default)]
    pub width: Option<u32>,
    /// Pixel height, when reported.
    #[serde(default)]
    pub height: Option<u32>,
}

/// Track entry inside an album's track page.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogTrackItem {
    /// Track name.
    #[serde(default)]
    pub name: String,
    /// Length in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
}

/// Paged list of tracks.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogPage {
    /// Tracks on this page.
    #[serde(default)]
    pub items: Vec<CatalogTrackItem>,
}

/// Album record.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogAlbum {
    /// Album name.
    #[serde(default)]
    pub name: String,
    /// Credited artists, in order.
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
    /// Artwork renditions.
    #[serde(default)]
    pub images: Vec<CatalogImage>,
    /// Year or full date.
    #[serde(default)]
    pub release_date: String,
    /// Record label.
    #[serde(default)]
    pub label: Option<String>,
    /// `spotify:album:…` URI.
    #[serde(default)]
    pub uri: Option<String>,
    /// Track listing.
    #[serde(default)]
    pub tracks: CatalogPage,
}

/// Album summary embedded in a track record.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogAlbumSummary {
    /// Album name.
    #[serde(default)]
    pub name: String,
    /// Artwork renditions.
    #[serde(default)]
    pub images: Vec<CatalogImage>,
    /// Year or full date.
    #[serde(default)]
    pub release_date: String,
    /// Record label, rarely present on summaries.
    #[serde(default)]
    pub label: Option<String>,
}

/// Track record.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CatalogTrack {
    /// Track name.
    #[serde(default)]
    pub name: String,
    /// Credited artists, in order.
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
    /// Length in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    /// `spotify:track:…` URI.
    #[serde(default)]
    pub uri: Option<String>,
    /// Album the track belongs to.
    #[serde(default)]
    pub album: CatalogAlbumSummary,
}

impl CatalogAlbum {
    /// Parse an album JSON payload.
    pub fn from_json(text: &str) -> PosterResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| PosterError::serde(format!("parse catalog album JSON: {e}")))
    }
}

impl CatalogTrack {
    /// Parse a track JSON payload.
    pub fn from_json(text: &str) -> PosterResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| PosterError::serde(format!("parse catalog track JSON: {e}")))
    }
}

/// Scan code choices made by the user rather than the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanCodeOptions {
    /// Request a scan code for the record's URI.
    pub show: bool,
    /// Text under the code.
    pub caption: Option<String>,
}

/// Largest rendition by reported width, else the first one listed.
pub fn pick_cover(images: &[CatalogImage]) -> Option<&CatalogImage> {
    let widest = images
        .iter()
        .filter(|i| i.width.is_some())
        .max_by_key(|i| i.width.unwrap_or(0));
    widest.or_else(|| images.first())
}

fn artist_names(artists: &[CatalogArtist]) -> Vec<String> {
    artists
        .iter()
        .map(|a| a.name.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

impl PosterDescription {
    /// Album poster description. The total duration is the sum of the listed tracks.
    pub fn from_catalog_album(album: &CatalogAlbum, code: &ScanCodeOptions) -> Self {
        let items = &album.tracks.items;
        let track_names: Vec<String> = items
            .iter()
            .map(|t| t.name.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self {
            variant: Variant::Album,
            title: album.name.trim().to_string(),
            artist_names: artist_names(&album.artists),
            cover_image_url: pick_cover(&album.images).map(|i| i.url.clone()),
            total_duration_ms: items.iter().map(|t| t.duration_ms).sum(),
            release_date: album.release_date.trim().to_string(),
            record_label: non_empty(album.label.as_deref()),
            track_names: (!track_names.is_empty()).then_some(track_names),
            catalog_uri: non_empty(album.uri.as_deref()),
            show_scan_code: code.show,
            code_caption: non_empty(code.caption.as_deref()),
        }
    }

    /// Track poster description. Artwork, release date and label come from the track's album.
    pub fn from_catalog_track(track: &CatalogTrack, code: &ScanCodeOptions) -> Self {
        Self {
            variant: Variant::Track,
            title: track.name.trim().to_string(),
            artist_names: artist_names(&track.artists),
            cover_image_url: pick_cover(&track.album.images).map(|i| i.url.clone()),
            total_duration_ms: track.duration_ms,
            release_date: track.album.release_date.trim().to_string(),
            record_label: non_empty(track.album.label.as_deref()),
            track_names: None,
            catalog_uri: non_empty(track.uri.as_deref()),
            show_scan_code: code.show,
            code_caption: non_empty(code.caption.as_deref()),
        }
    }
}

/// Kind of catalog record a reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    /// An album.
    Album,
    /// A single track.
    Track,
}

impl CatalogKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Track => "track",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "album" => Some(Self::Album),
            "track" => Some(Self::Track),
            _ => None,
        }
    }
}

/// A catalog record reference parsed from a share URL or URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRef {
    /// Record kind.
    pub kind: CatalogKind,
    /// Base-62 record id.
    pub id: String,
}

impl CatalogRef {
    /// Accepts `https://open.spotify.com/{album|track}/{id}` (query and locale prefix allowed)
    /// and `spotify:{album|track}:{id}`.
    pub fn parse(input: &str) -> PosterResult<Self> {
        let input = input.trim();
        let bad = || PosterError::validation(format!("unrecognized catalog reference '{input}'"));

        let (kind, id) = if let Some(rest) = input.strip_prefix("spotify:") {
            rest.split_once(':').ok_or_else(bad)?
        } else {
            let rest = input
                .strip_prefix("https://")
                .or_else(|| input.strip_prefix("http://"))
                .ok_or_else(bad)?;
            let (host, path) = rest.split_once('/').ok_or_else(bad)?;
            if host != "open.spotify.com" {
                return Err(bad());
            }
            let path = path.split(['?', '#']).next().unwrap_or_default();
            let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
            let at = parts
                .iter()
                .position(|p| CatalogKind::parse(p).is_some())
                .ok_or_else(bad)?;
            match (parts.get(at), parts.get(at + 1)) {
                (Some(kind), Some(id)) => (*kind, *id),
                _ => return Err(bad()),
            }
        };

        let kind = CatalogKind::parse(kind).ok_or_else(bad)?;
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(bad());
        }
        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    /// `spotify:{kind}:{id}`.
    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spotify:{}:{}", self.kind.as_str(), self.id)
    }
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
