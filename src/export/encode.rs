use std::io::Cursor;

use anyhow::Context as _;

use crate::compose::overlay::CompositeResult;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;

/// MIME type of every exported file.
pub const PNG_MIME: &str = "image/png";

/// Encode a raster as PNG (straight alpha).
pub fn encode_png(image: &PremulImage) -> LuminaResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(image.width(), image.height(), image.to_straight_rgba())
        .ok_or_else(|| LuminaError::export("raster buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode a composite for export. Tainted surfaces cannot be read back and fail.
pub fn encode_composite(result: &CompositeResult) -> LuminaResult<Vec<u8>> {
    if result.is_tainted() {
        return Err(LuminaError::export(
            "surface is tainted by a cross-origin frame image and cannot be exported",
        ));
    }
    encode_png(result.image())
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
