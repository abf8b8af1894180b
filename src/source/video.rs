use async_trait::async_trait;

use crate::foundation::error::LuminaResult;
use crate::render::raster::PremulImage;

/// Which way the camera faces.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front camera; previewed (and therefore captured) mirrored.
    User,
    /// Rear camera.
    #[default]
    Environment,
}

impl FacingMode {
    /// Whether captures from this direction are flipped horizontally.
    pub fn is_mirrored(self) -> bool {
        matches!(self, FacingMode::User)
    }

    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }
}

/// One frame grabbed from a live source, at the source's native resolution.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    /// Frame pixels.
    pub image: PremulImage,
    /// Direction the source was facing when the frame was grabbed.
    pub facing: FacingMode,
}

impl VideoFrame {
    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A live video feed.
///
/// Failures to start or to produce a frame are reported as
/// [`crate::LuminaError::SourceUnavailable`].
#[async_trait]
pub trait VideoSource: Send {
    /// Acquire (or re-acquire) the stream for `facing`, replacing any running stream.
    async fn start(&mut self, facing: FacingMode) -> LuminaResult<()>;

    /// Release the stream. Stopping an idle source is a no-op.
    fn stop(&mut self);

    /// Whether a stream is currently running.
    fn is_running(&self) -> bool;

    /// Grab the current frame of the running stream.
    async fn grab_frame(&mut self) -> LuminaResult<VideoFrame>;
}

#[cfg(test)]
#[path = "../../tests/unit/source/video.rs"]
mod tests;
