use crate::foundation::error::{LuminaError, LuminaResult};

pub use kurbo::{Affine, Point, Rect, Size};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest accepted side length. Larger surfaces are treated as configuration mistakes.
    pub const MAX_DIM: u32 = 16_384;

    /// Portrait 9:16 capture resolution used when nothing else is configured.
    pub const PORTRAIT_HD: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> LuminaResult<Self> {
        if width == 0 || height == 0 {
            return Err(LuminaError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(LuminaError::validation(format!(
                "canvas too large: {width}x{height} (max {0}x{0})",
                Self::MAX_DIM
            )));
        }
        Ok(Self { width, height })
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Full-canvas rectangle in pixel space.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::PORTRAIT_HD
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Canvas {
    type Err = LuminaError;

    /// Parse `WIDTHxHEIGHT`, e.g. `1080x1920`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| LuminaError::validation(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| LuminaError::validation(format!("invalid canvas side '{v}': {e}")))
        };
        Self::new(parse(w)?, parse(h)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
