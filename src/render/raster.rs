use crate::foundation::core::Canvas;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// A single premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// A raster image as premultiplied RGBA8 pixels, tightly packed and row-major.
///
/// The buffer length is always `width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PremulImage {
    /// Wrap an already premultiplied buffer.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> LuminaResult<Self> {
        if width == 0 || height == 0 {
            return Err(LuminaError::validation(format!(
                "raster must be non-empty, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LuminaError::validation("raster size overflow"))?;
        if data.len() != expected {
            return Err(LuminaError::validation(format!(
                "raster buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba(width: u32, height: u32, mut rgba: Vec<u8>) -> LuminaResult<Self> {
        premultiply_rgba8_in_place(&mut rgba);
        Self::new(width, height, rgba)
    }

    /// A canvas-sized image where every pixel is `px`.
    pub fn filled(canvas: Canvas, px: PremulRgba8) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: px.repeat(canvas.width as usize * canvas.height as usize),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Straight-alpha copy of the pixels, as expected by image encoders.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
