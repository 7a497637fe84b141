//! Collaborator seams consumed by the renderer.
//!
//! The renderer does not know who is exporting the report or where the
//! branding logo comes from; both arrive through these traits.  The built-in
//! implementations cover the common cases (a fixed identity, no logo, a logo
//! file on disk) and a generated placeholder logo for demos and tests.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};

use crate::error::BrandingError;

/// Supplies the identity stamped into the "Generated by" line.  Returning
/// `None` aborts the render before any drawing happens.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<String>;
}

/// A fixed identity, typically the signed-in user's email.
pub struct StaticIdentity(pub String);

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Identity provider for sessions without an authenticated user.  Always
/// fails the render, mirroring the upstream auth guard.
pub struct NoIdentity;

impl IdentityProvider for NoIdentity {
    fn current_user(&self) -> Option<String> {
        None
    }
}

/// Raster logo handed to the renderer, with the width it should occupy.
pub struct LogoAsset {
    pub bytes: Vec<u8>,
    pub width_mm: f64,
}

/// Supplies the branding logo placed at the top of the first page.
///
/// `Ok(None)` means "no logo, reserve no height".  Errors are fatal to the
/// whole render; retry policy belongs to the implementation, not the
/// renderer.
pub trait BrandingProvider {
    fn fetch_logo(&self) -> Result<Option<LogoAsset>, BrandingError>;
}

/// Branding provider that reserves no space.
pub struct NoBranding;

impl BrandingProvider for NoBranding {
    fn fetch_logo(&self) -> Result<Option<LogoAsset>, BrandingError> {
        Ok(None)
    }
}

/// Loads the logo from an image file on disk.
pub struct FileLogo {
    pub path: PathBuf,
    pub width_mm: f64,
}

impl BrandingProvider for FileLogo {
    fn fetch_logo(&self) -> Result<Option<LogoAsset>, BrandingError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| BrandingError(format!("{}: {e}", self.path.display())))?;
        Ok(Some(LogoAsset {
            bytes,
            width_mm: self.width_mm,
        }))
    }
}

/// Branding provider backed by a generated placeholder logo, for demos and
/// tests that should not depend on asset files.
pub struct PlaceholderBranding {
    pub width_mm: f64,
}

impl Default for PlaceholderBranding {
    fn default() -> Self {
        Self { width_mm: 40.0 }
    }
}

impl BrandingProvider for PlaceholderBranding {
    fn fetch_logo(&self) -> Result<Option<LogoAsset>, BrandingError> {
        let bytes = placeholder_logo_png().map_err(BrandingError::new)?;
        Ok(Some(LogoAsset {
            bytes,
            width_mm: self.width_mm,
        }))
    }
}

/// Renders a small horizontal gradient banner and encodes it as PNG.
pub fn placeholder_logo_png() -> Result<Vec<u8>, image::ImageError> {
    const WIDTH: u32 = 240;
    const HEIGHT: u32 = 60;
    const START: [u8; 3] = [36, 92, 160];
    const END: [u8; 3] = [228, 238, 250];

    let span = (WIDTH.saturating_sub(1)) as f32;
    let buffer = ImageBuffer::from_fn(WIDTH, HEIGHT, |x, _| {
        let mix = if span > 0.0 { x as f32 / span } else { 0.0 };
        let mut channels = [0u8; 3];
        for (index, channel) in channels.iter_mut().enumerate() {
            let start = START[index] as f32;
            let end = END[index] as f32;
            *channel = (start + (end - start) * mix).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(channels)
    });

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_logo_is_a_decodable_png() {
        let bytes = placeholder_logo_png().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        use image::GenericImageView;
        assert_eq!(decoded.dimensions(), (240, 60));
    }

    #[test]
    fn missing_logo_file_is_a_branding_error() {
        let provider = FileLogo {
            path: PathBuf::from("/nonexistent/logo.png"),
            width_mm: 40.0,
        };
        assert!(provider.fetch_logo().is_err());
    }

    #[test]
    fn no_branding_reserves_nothing() {
        assert!(NoBranding.fetch_logo().unwrap().is_none());
    }
}
