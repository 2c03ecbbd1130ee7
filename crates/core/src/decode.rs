//! Image decoding for texture uploads.
//!
//! Only available with the `png` feature. Decoded pixels are packed 8 bits
//! per channel, row-major, first row at the top of the image.

use std::path::Path;

use crate::error::RenderError;

/// Channel layout of a decoded pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// A decoded image ready for [`Texture2D::load`](crate::render::Texture2D).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub pixels: Vec<u8>,
}

/// Decodes the image at `path`, converting it to `layout`.
///
/// # Errors
///
/// Returns `RenderError::Decode` if the file cannot be opened or is not a
/// supported image.
pub fn decode(path: &Path, layout: PixelLayout) -> Result<DecodedImage, RenderError> {
    let img = image::open(path).map_err(|e| RenderError::Decode {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let (width, height, pixels) = match layout {
        PixelLayout::Rgb => {
            let buf = img.to_rgb8();
            (buf.width(), buf.height(), buf.into_raw())
        }
        PixelLayout::Rgba => {
            let buf = img.to_rgba8();
            (buf.width(), buf.height(), buf.into_raw())
        }
    };

    log::debug!(
        "decoded {} ({width}x{height}, {layout:?})",
        path.display()
    );

    Ok(DecodedImage {
        width,
        height,
        layout,
        pixels,
    })
}
