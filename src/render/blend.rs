use crate::foundation::error::{LuminaError, LuminaResult};
use crate::foundation::math::mul_div255;
use crate::render::raster::{PremulImage, PremulRgba8};

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Draw `src` over `dst`; both must have identical dimensions.
pub fn over_in_place(dst: &mut PremulImage, src: &PremulImage) -> LuminaResult<()> {
    if dst.canvas() != src.canvas() {
        return Err(LuminaError::validation(format!(
            "over_in_place expects equal-size rasters, got {} and {}",
            dst.canvas(),
            src.canvas()
        )));
    }
    for (d, s) in dst
        .data_mut()
        .chunks_exact_mut(4)
        .zip(src.data().chunks_exact(4))
    {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
