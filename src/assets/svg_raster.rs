use std::sync::Arc;

use crate::assets::decode::parse_svg;
use crate::compose::geometry::CoverFit;
use crate::foundation::core::Canvas;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;

/// Parses vector frame markup and rasterizes it at output resolution.
///
/// Holds the font database shared by every parse so system fonts are scanned once.
#[derive(Clone, Debug)]
pub struct VectorDecoder {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for VectorDecoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VectorDecoder {
    /// Create a decoder, optionally loading system fonts for `<text>` elements.
    pub fn new(load_system_fonts: bool) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if load_system_fonts {
            db.load_system_fonts();
        }
        tracing::debug!(faces = db.len(), "vector decoder font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Parse `markup` and rasterize it to exactly `target`, cover-fitted and centered.
    pub fn rasterize(&self, markup: &str, target: Canvas) -> LuminaResult<PremulImage> {
        let tree = parse_svg(markup.as_bytes(), self.fontdb.clone())?;
        rasterize_cover(&tree, target)
    }
}

/// Render `tree` onto a transparent `target` surface using slice/cover fitting.
///
/// The SVG's logical size is scaled uniformly until it covers the target; overflow is cropped
/// symmetrically, exactly like camera capture.
pub fn rasterize_cover(tree: &usvg::Tree, target: Canvas) -> LuminaResult<PremulImage> {
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(LuminaError::asset_load("svg has invalid width/height"));
    }
    let fit = CoverFit::compute(w, h, target)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(target.width, target.height)
        .ok_or_else(|| LuminaError::asset_load("failed to allocate svg pixmap"))?;
    let [a, b, c, d, e, f] = fit.placement().as_coeffs();
    let xform =
        resvg::tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are premultiplied RGBA8, the same layout as `PremulImage`.
    PremulImage::new(target.width, target.height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
