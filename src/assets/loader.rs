use std::path::{Path, PathBuf};

use crate::assets::bitmap::Bitmap;
use crate::assets::decode::decode_image;
use crate::foundation::error::{PosterError, PosterResult};

/// Fetch-and-decode capability used for cover artwork and scan codes.
///
/// The render pipeline treats every failure from this trait as recoverable for the element that
/// requested it.
pub trait ImageLoader {
    /// Load and decode the image at `url`.
    fn load(&mut self, url: &str) -> PosterResult<Bitmap>;
}

/// Loader for `file://` URLs, plain paths, and (with the `http` feature) `http(s)://` URLs.
pub struct DefaultImageLoader {
    base_dir: PathBuf,
    #[cfg(feature = "http")]
    client: Option<reqwest::blocking::Client>,
    #[cfg(feature = "http")]
    timeout: std::time::Duration,
}

impl DefaultImageLoader {
    /// Relative paths resolve against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            #[cfg(feature = "http")]
            client: None,
            #[cfg(feature = "http")]
            timeout: std::time::Duration::from_secs(15),
        }
    }

    /// Network timeout for `http(s)://` URLs. Ignored without the `http` feature.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        #[cfg(feature = "http")]
        {
            self.timeout = std::time::Duration::from_secs(secs.max(1));
            self.client = None;
        }
        #[cfg(not(feature = "http"))]
        let _ = secs;
        self
    }

    fn read_path(&self, path: &Path) -> PosterResult<Vec<u8>> {
        let p = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        std::fs::read(&p)
            .map_err(|e| PosterError::image_load(format!("read '{}': {e}", p.display())))
    }

    #[cfg(feature = "http")]
    fn fetch(&mut self, url: &str) -> PosterResult<Vec<u8>> {
        if self.client.is_none() {
            let client = reqwest::blocking::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| PosterError::image_load(format!("build http client: {e}")))?;
            self.client = Some(client);
        }
        let Some(client) = self.client.as_ref() else {
            return Err(PosterError::image_load("http client unavailable"));
        };
        let resp = client
            .get(url)
            .send()
            .map_err(|e| PosterError::image_load(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PosterError::image_load(format!("GET {url}: HTTP {status}")));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| PosterError::image_load(format!("read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "http"))]
    fn fetch(&mut self, url: &str) -> PosterResult<Vec<u8>> {
        Err(PosterError::image_load(format!(
            "cannot fetch {url}: built without the `http` feature"
        )))
    }
}

impl ImageLoader for DefaultImageLoader {
    fn load(&mut self, url: &str) -> PosterResult<Bitmap> {
        let url = url.trim();
        let bytes = if url.starts_with("http://") || url.starts_with("https://") {
            self.fetch(url)?
        } else if let Some(rest) = url.strip_prefix("file://") {
            self.read_path(Path::new(rest))?
        } else {
            self.read_path(Path::new(url))?
        };
        tracing::debug!(url, bytes = bytes.len(), "loaded image bytes");
        decode_image(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
