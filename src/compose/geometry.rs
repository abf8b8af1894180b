use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{LuminaError, LuminaResult};

/// Placement of a source scaled to cover a target canvas, centered, aspect preserved.
///
/// Drawing the source scaled to `draw_width x draw_height` at `(start_x, start_y)` crops the
/// overflow symmetrically on the longer axis. Offsets are zero or negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Source width in source units.
    pub source_width: f64,
    /// Source height in source units.
    pub source_height: f64,
    /// Scaled source width in target pixels.
    pub draw_width: f64,
    /// Scaled source height in target pixels.
    pub draw_height: f64,
    /// Left edge of the scaled source in target pixels.
    pub start_x: f64,
    /// Top edge of the scaled source in target pixels.
    pub start_y: f64,
}

impl CoverFit {
    /// Compute the cover placement of a `source_width x source_height` source onto `target`.
    pub fn compute(source_width: f64, source_height: f64, target: Canvas) -> LuminaResult<Self> {
        if !(source_width.is_finite() && source_height.is_finite())
            || source_width <= 0.0
            || source_height <= 0.0
        {
            return Err(LuminaError::validation(format!(
                "cover fit needs a positive source size, got {source_width}x{source_height}"
            )));
        }

        let target_w = f64::from(target.width);
        let target_h = f64::from(target.height);
        let source_ratio = source_width / source_height;
        let target_ratio = target_w / target_h;

        let (draw_width, draw_height, start_x, start_y) = if source_ratio > target_ratio {
            // Source is wider: match heights, crop left and right.
            let draw_width = target_h * source_ratio;
            (draw_width, target_h, (target_w - draw_width) / 2.0, 0.0)
        } else {
            // Source is taller or equal: match widths, crop top and bottom.
            let draw_height = target_w / source_ratio;
            (target_w, draw_height, 0.0, (target_h - draw_height) / 2.0)
        };

        Ok(Self {
            source_width,
            source_height,
            draw_width,
            draw_height,
            start_x,
            start_y,
        })
    }

    /// Transform from source coordinates to target pixels: scale to the draw size, then offset
    /// to `(start_x, start_y)`.
    pub fn placement(&self) -> Affine {
        Affine::translate((self.start_x, self.start_y))
            * Affine::scale_non_uniform(
                self.draw_width / self.source_width,
                self.draw_height / self.source_height,
            )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/geometry.rs"]
mod tests;
