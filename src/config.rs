use std::path::{Path, PathBuf};

use crate::foundation::error::{PosterError, PosterResult};

/// Scan code image service. `{uri}` is replaced by the catalog URI.
pub const DEFAULT_SCAN_CODE_ENDPOINT: &str =
    "https://scannables.scdn.co/uri/plain/png/FFFFFF/black/640/{uri}";

/// Presentation and I/O settings shared by every render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// URL template for scan code images; must contain `{uri}`.
    pub scan_code_endpoint: String,
    /// Wrap the scan code caption in literal double quotes.
    pub quote_caption: bool,
    /// Right-aligned footer credit on album posters. Empty hides it.
    pub generator_credit: String,
    /// Small-type line in the bottom-right corner. Empty hides it.
    pub attribution: String,
    /// Searched for fonts before system fonts.
    pub font_dir: Option<PathBuf>,
    /// Timeout for HTTP image loads.
    pub http_timeout_secs: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scan_code_endpoint: DEFAULT_SCAN_CODE_ENDPOINT.to_string(),
            quote_caption: false,
            generator_credit: "Generated with Sleeve".to_string(),
            attribution: "Metadata and artwork via Spotify".to_string(),
            font_dir: None,
            http_timeout_secs: 15,
        }
    }
}

impl RenderSettings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PosterError::validation(format!("read settings '{}': {e}", path.display()))
        })?;
        let settings: Self = serde_json::from_str(&text)
            .map_err(|e| PosterError::serde(format!("settings '{}': {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Override fields from `SLEEVE_*` environment variables.
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// [`RenderSettings::apply_env`] with an explicit variable lookup.
    ///
    /// Empty values are ignored, as is a timeout that does not parse to a positive integer.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = get("SLEEVE_SCAN_CODE_ENDPOINT") {
            self.scan_code_endpoint = endpoint;
        }
        if let Some(dir) = get("SLEEVE_FONT_DIR") {
            self.font_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = get("SLEEVE_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.http_timeout_secs = secs;
        }
        self
    }

    /// Reject settings no render could use.
    pub fn validate(&self) -> PosterResult<()> {
        if !self.scan_code_endpoint.contains("{uri}") {
            return Err(PosterError::validation(
                "scan_code_endpoint must contain a {uri} placeholder",
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(PosterError::validation("http_timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Scan code image URL for `catalog_uri`.
    pub fn scan_code_url(&self, catalog_uri: &str) -> String {
        self.scan_code_endpoint.replace("{uri}", catalog_uri)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
