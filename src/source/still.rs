use std::path::Path;

use async_trait::async_trait;

use crate::assets::decode::decode_image;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;
use crate::source::video::{FacingMode, VideoFrame, VideoSource};

/// A "camera" that always shows the same image.
///
/// Used by the CLI to capture from a photo on disk and by tests as a deterministic feed.
#[derive(Clone, Debug)]
pub struct StillFrameSource {
    image: PremulImage,
    running: Option<FacingMode>,
    denied: bool,
}

impl StillFrameSource {
    /// Wrap an in-memory image.
    pub fn new(image: PremulImage) -> Self {
        Self {
            image,
            running: None,
            denied: false,
        }
    }

    /// Decode an image file.
    pub fn from_path(path: impl AsRef<Path>) -> LuminaResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            LuminaError::source_unavailable(format!("read '{}': {e}", path.display()))
        })?;
        let image = decode_image(&bytes).map_err(|e| {
            LuminaError::source_unavailable(format!("decode '{}': {e}", path.display()))
        })?;
        Ok(Self::new(image))
    }

    /// A source whose `start` always fails, as when camera permission is denied.
    pub fn denied(image: PremulImage) -> Self {
        Self {
            denied: true,
            ..Self::new(image)
        }
    }
}

#[async_trait]
impl VideoSource for StillFrameSource {
    async fn start(&mut self, facing: FacingMode) -> LuminaResult<()> {
        if self.denied {
            self.running = None;
            return Err(LuminaError::source_unavailable("camera permission denied"));
        }
        self.running = Some(facing);
        Ok(())
    }

    fn stop(&mut self) {
        self.running = None;
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    async fn grab_frame(&mut self) -> LuminaResult<VideoFrame> {
        let facing = self
            .running
            .ok_or_else(|| LuminaError::source_unavailable("video stream is not running"))?;
        Ok(VideoFrame {
            image: self.image.clone(),
            facing,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/still.rs"]
mod tests;
