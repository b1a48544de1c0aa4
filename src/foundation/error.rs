/// Convenience result alias used across the crate.
pub type PosterResult<T> = Result<T, PosterError>;

/// Crate-wide error type.
///
/// Failures that only affect one visual element (a cover or scan code that will not load) are
/// recovered inside the render pipeline and never escape [`crate::render_poster`]; the variants
/// below are what callers see when something is wrong with the input itself or the raster target.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Malformed poster description, settings, or surface/geometry mismatch.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image could not be fetched or decoded.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// The raster surface could not complete a draw call.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::ImageLoad`].
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`PosterError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PosterError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
