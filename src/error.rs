//! Error types shared across the report renderer.

use thiserror::Error;

/// Failure reported by a [`crate::providers::BrandingProvider`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BrandingError(pub String);

impl BrandingError {
    /// Creates a branding error from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}

/// Errors that can abort a report render.
///
/// Degenerate analytics data (empty series, all-zero values, single points)
/// is never an error; the chart drawers substitute placeholders instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No authenticated user identity was available for attribution.
    #[error("no authenticated user identity available")]
    NotAuthenticated,
    /// The branding asset could not be fetched.
    #[error("failed to fetch branding asset: {0}")]
    Branding(#[from] BrandingError),
    /// The branding logo bytes could not be decoded as an image.
    #[error("failed to decode branding logo: {0}")]
    BrandingImage(#[from] image::ImageError),
    /// The PDF backend rejected an operation.
    #[error("pdf backend error: {0}")]
    Pdf(String),
    /// Writing the finished artifact failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
