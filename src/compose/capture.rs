use std::sync::Arc;

use crate::compose::geometry::CoverFit;
use crate::foundation::core::Canvas;
use crate::foundation::error::LuminaResult;
use crate::render::raster::PremulImage;
use crate::render::resize::{crop, flip_horizontal, resize_to};
use crate::source::video::VideoFrame;

/// A captured photo at the fixed target resolution. Immutable; cloning shares the pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    image: Arc<PremulImage>,
    mirrored: bool,
}

impl CapturedImage {
    /// Captured pixels.
    pub fn image(&self) -> &PremulImage {
        &self.image
    }

    /// Resolution of the capture.
    pub fn canvas(&self) -> Canvas {
        self.image.canvas()
    }

    /// Whether the capture was flipped to match a mirrored preview.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Adopt a previously captured (or any) image, cover-fitting it to `target` without mirroring.
    ///
    /// An image already at `target` resolution is taken over pixel for pixel.
    pub fn from_image(image: PremulImage, target: Canvas) -> LuminaResult<Self> {
        if image.canvas() == target {
            return Ok(Self {
                image: Arc::new(image),
                mirrored: false,
            });
        }
        cover_crop(&image, target, false)
    }
}

/// Turn a live frame into a `target`-sized capture using centered cover cropping.
///
/// Frames from a mirrored (user-facing) source are flipped horizontally so the capture matches
/// what the preview showed.
pub fn capture_frame(frame: &VideoFrame, target: Canvas) -> LuminaResult<CapturedImage> {
    cover_crop(&frame.image, target, frame.facing.is_mirrored())
}

/// Scale `src` to cover `target`, centered, then mirror it when asked.
///
/// The visible source window is cropped and resized to `target`, which places every pixel where
/// drawing the whole source at `(start_x, start_y)` would. Mirroring is the flip
/// `x -> target_width - x` of the finished surface.
fn cover_crop(src: &PremulImage, target: Canvas, mirrored: bool) -> LuminaResult<CapturedImage> {
    let fit = CoverFit::compute(f64::from(src.width()), f64::from(src.height()), target)?;
    let (x, width) = visible_span(fit.start_x, fit.draw_width, target.width, src.width());
    let (y, height) = visible_span(fit.start_y, fit.draw_height, target.height, src.height());
    tracing::debug!(
        source = %src.canvas(),
        %target,
        draw_width = fit.draw_width,
        draw_height = fit.draw_height,
        start_x = fit.start_x,
        start_y = fit.start_y,
        mirrored,
        "cover crop"
    );

    let window = Canvas { width, height };
    let scaled = if window == src.canvas() {
        resize_to(src, target)?
    } else {
        resize_to(&crop(src, x, y, window)?, target)?
    };
    let image = if mirrored {
        flip_horizontal(&scaled)?
    } else {
        scaled
    };
    Ok(CapturedImage {
        image: Arc::new(image),
        mirrored,
    })
}

/// Source-pixel offset and length of the part of one axis that lands on the target.
fn visible_span(start: f64, draw_len: f64, target_len: u32, src_len: u32) -> (u32, u32) {
    let scale = draw_len / f64::from(src_len);
    let len = (f64::from(target_len) / scale)
        .round()
        .clamp(1.0, f64::from(src_len)) as u32;
    let offset = (-start / scale)
        .round()
        .clamp(0.0, f64::from(src_len - len)) as u32;
    (offset, len)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/capture.rs"]
mod tests;
