use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};

use crate::foundation::core::Canvas;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;

/// Filter used for every rescale. Its support widens with the downscale ratio, so large camera
/// frames are area-averaged instead of point-sampled.
const FILTER: FilterType = FilterType::Triangle;

/// Resample `src` to exactly `target`, ignoring aspect ratio.
///
/// Premultiplied channels are filtered together, so transparent texels never bleed color.
/// A same-size resize returns the pixels unchanged.
pub fn resize_to(src: &PremulImage, target: Canvas) -> LuminaResult<PremulImage> {
    if src.canvas() == target {
        return Ok(src.clone());
    }
    let out = imageops::resize(&view(src)?, target.width, target.height, FILTER);
    from_buffer(out)
}

/// Copy the `size` region whose top-left corner is `(x, y)`.
pub fn crop(src: &PremulImage, x: u32, y: u32, size: Canvas) -> LuminaResult<PremulImage> {
    let fits = |start: u32, len: u32, max: u32| start.checked_add(len).is_some_and(|end| end <= max);
    if !fits(x, size.width, src.width()) || !fits(y, size.height, src.height()) {
        return Err(LuminaError::validation(format!(
            "crop {size} at ({x}, {y}) exceeds {} raster",
            src.canvas()
        )));
    }
    let owned = RgbaImage::from_raw(src.width(), src.height(), src.data().to_vec())
        .ok_or_else(|| LuminaError::validation("raster buffer does not match its dimensions"))?;
    from_buffer(imageops::crop_imm(&owned, x, y, size.width, size.height).to_image())
}

/// Reflect `src` across its vertical centerline: pixel `x` moves to `width - 1 - x`.
pub fn flip_horizontal(src: &PremulImage) -> LuminaResult<PremulImage> {
    from_buffer(imageops::flip_horizontal(&view(src)?))
}

fn view(src: &PremulImage) -> LuminaResult<ImageBuffer<Rgba<u8>, &[u8]>> {
    ImageBuffer::from_raw(src.width(), src.height(), src.data())
        .ok_or_else(|| LuminaError::validation("raster buffer does not match its dimensions"))
}

fn from_buffer(buf: RgbaImage) -> LuminaResult<PremulImage> {
    let (width, height) = buf.dimensions();
    PremulImage::new(width, height, buf.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/render/resize.rs"]
mod tests;
