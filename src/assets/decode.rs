use std::sync::Arc;

use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;

/// Decode an encoded raster (PNG, JPEG, ...) into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> LuminaResult<PremulImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| LuminaError::asset_load(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PremulImage::from_straight_rgba(width, height, rgba.into_raw())
}

/// Parse SVG markup into an opaque `usvg` tree.
///
/// String `href`s (external files, URLs) are never resolved; only embedded `data:` images are
/// decoded. Scripts and other live content are not part of the `usvg` model at all.
pub fn parse_svg(bytes: &[u8], fontdb: Arc<usvg::fontdb::Database>) -> LuminaResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb,
        image_href_resolver: usvg::ImageHrefResolver {
            resolve_data: usvg::ImageHrefResolver::default_data_resolver(),
            resolve_string: Box::new(|_, _| None),
        },
        ..Default::default()
    };
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| LuminaError::asset_load(format!("parse svg tree: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
