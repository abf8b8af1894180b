use std::sync::Arc;

use crate::assets::catalog::FrameCatalog;
use crate::assets::generate::{FrameGenerator, generate_frame};
use crate::assets::loader::AssetLoader;
use crate::assets::model::FrameAsset;
use crate::compose::capture::{CapturedImage, capture_frame};
use crate::compose::overlay::{CompositeResult, Compositor, CompositorOpts};
use crate::export::encode::{PNG_MIME, encode_composite};
use crate::export::sink::{
    Clock, ExportFile, ExportSink, SHARE_FILE_NAME, ShareMeta, ShareOutcome, download_filename,
};
use crate::foundation::core::Canvas;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;
use crate::source::video::{FacingMode, VideoSource};

/// What the session is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Live camera with frame overlay.
    #[default]
    Camera,
    /// A captured photo with frame overlay.
    Preview,
}

/// Options for a [`Session`].
#[derive(Clone, Debug, Default)]
pub struct SessionOpts {
    /// Resolution of every capture and composite.
    pub target: Canvas,
    /// Starting camera direction.
    pub facing: FacingMode,
    /// Compositor configuration.
    pub compositor: CompositorOpts,
}

/// One user's capture session: the frame catalog with its active selection, the single live
/// capture, the camera direction and the compositor.
///
/// Every state change is a whole-value swap; nothing is partially updated on failure.
#[derive(Debug)]
pub struct Session {
    catalog: FrameCatalog,
    captured: Option<CapturedImage>,
    mode: Mode,
    facing: FacingMode,
    target: Canvas,
    compositor: Compositor,
}

impl Session {
    /// Create a session in camera mode with nothing captured.
    pub fn new(catalog: FrameCatalog, loader: Arc<dyn AssetLoader>, opts: SessionOpts) -> Self {
        Self {
            catalog,
            captured: None,
            mode: Mode::Camera,
            facing: opts.facing,
            target: opts.target,
            compositor: Compositor::new(loader, opts.compositor),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current camera direction.
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Capture resolution.
    pub fn target(&self) -> Canvas {
        self.target
    }

    /// The frame catalog.
    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    /// The live capture, if any.
    pub fn captured(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }

    /// The active frame.
    pub fn active_frame(&self) -> &FrameAsset {
        self.catalog.active()
    }

    /// Select the active frame. Unknown ids fail with `NotFound` and change nothing.
    pub fn select_frame(&mut self, id: &str) -> LuminaResult<&FrameAsset> {
        self.catalog.set_active(id)
    }

    /// Append an asset (e.g. a generated one) to the catalog.
    pub fn append_frame(&mut self, asset: FrameAsset) -> LuminaResult<&FrameAsset> {
        self.catalog.append(asset)
    }

    /// Generate a themed vector frame and append it to the catalog.
    pub async fn generate_frame(
        &mut self,
        generator: &dyn FrameGenerator,
        theme: &str,
    ) -> LuminaResult<&FrameAsset> {
        generate_frame(generator, &mut self.catalog, theme).await
    }

    /// Start `source` for the current direction. Only valid in camera mode.
    pub async fn start_camera(&mut self, source: &mut dyn VideoSource) -> LuminaResult<()> {
        self.require_mode(Mode::Camera, "start the camera")?;
        source.start(self.facing).await.map_err(|e| {
            tracing::error!(error = %e, "camera init failed");
            into_source_unavailable(e)
        })
    }

    /// Flip the camera direction and restart `source` with it. Only valid in camera mode.
    ///
    /// The new direction is kept even when the restart fails, so a retry uses it.
    pub async fn switch_facing(&mut self, source: &mut dyn VideoSource) -> LuminaResult<FacingMode> {
        self.require_mode(Mode::Camera, "switch cameras")?;
        self.facing = self.facing.toggled();
        tracing::debug!(facing = ?self.facing, "camera direction switched");
        self.start_camera(source).await?;
        Ok(self.facing)
    }

    /// Grab a frame from `source`, cover-crop it to the target resolution and make it the live
    /// capture, replacing any previous one. Moves to preview mode and stops the source.
    ///
    /// When no frame is available this fails with `SourceUnavailable` and the session is
    /// unchanged.
    #[tracing::instrument(level = "info", skip_all, fields(target = %self.target))]
    pub async fn capture(&mut self, source: &mut dyn VideoSource) -> LuminaResult<&CapturedImage> {
        self.require_mode(Mode::Camera, "capture")?;
        let frame = source.grab_frame().await.map_err(|e| {
            tracing::warn!(error = %e, "no frame to capture");
            into_source_unavailable(e)
        })?;
        let captured = capture_frame(&frame, self.target)?;
        tracing::info!(
            source_width = frame.width(),
            source_height = frame.height(),
            mirrored = captured.is_mirrored(),
            "photo captured"
        );

        source.stop();
        self.mode = Mode::Preview;
        Ok(self.captured.insert(captured))
    }

    /// Use an existing image (e.g. a photo from disk) as the live capture and move to preview.
    pub fn adopt_capture(&mut self, image: PremulImage) -> LuminaResult<&CapturedImage> {
        let captured = CapturedImage::from_image(image, self.target)?;
        self.mode = Mode::Preview;
        Ok(self.captured.insert(captured))
    }

    /// Drop the live capture and return to camera mode.
    pub fn discard(&mut self) {
        self.captured = None;
        self.mode = Mode::Camera;
    }

    /// Composite the active frame over the live capture.
    pub async fn composite(&self) -> LuminaResult<CompositeResult> {
        let captured = self
            .captured
            .as_ref()
            .ok_or_else(|| LuminaError::validation("nothing captured"))?;
        Ok(self
            .compositor
            .composite(captured, self.catalog.active())
            .await)
    }

    /// Composite, encode and hand the photo to `sink` as `lumina-photo-<millis>.png`.
    ///
    /// Returns the filename used.
    #[tracing::instrument(level = "info", skip_all, fields(frame = %self.active_frame().id()))]
    pub async fn save(&self, sink: &dyn ExportSink, clock: &dyn Clock) -> LuminaResult<String> {
        let result = self.composite().await?;
        let bytes = encode_composite(&result)?;
        let name = download_filename(clock.now_millis());
        sink.download(ExportFile {
            name: name.clone(),
            mime: PNG_MIME,
            bytes,
        })
        .await?;
        Ok(name)
    }

    /// Composite, encode and offer the photo to the platform share capability.
    ///
    /// A missing share capability is `ExportUnsupported`; a failed share invocation is logged
    /// and reported as [`ShareOutcome::Failed`] rather than as an error.
    #[tracing::instrument(level = "info", skip_all, fields(frame = %self.active_frame().id()))]
    pub async fn share(&self, sink: &dyn ExportSink) -> LuminaResult<ShareOutcome> {
        let result = self.composite().await?;
        let bytes = encode_composite(&result)?;
        let file = ExportFile {
            name: SHARE_FILE_NAME.to_string(),
            mime: PNG_MIME,
            bytes,
        };
        match sink.share(file, &ShareMeta::default()).await {
            ShareOutcome::Unsupported => Err(LuminaError::export_unsupported(
                "sharing not supported on this platform",
            )),
            ShareOutcome::Failed(msg) => {
                tracing::warn!(error = %msg, "share failed");
                Ok(ShareOutcome::Failed(msg))
            }
            ShareOutcome::Shared => Ok(ShareOutcome::Shared),
        }
    }

    fn require_mode(&self, mode: Mode, action: &str) -> LuminaResult<()> {
        if self.mode != mode {
            return Err(LuminaError::validation(format!(
                "cannot {action} in {:?} mode",
                self.mode
            )));
        }
        Ok(())
    }
}

fn into_source_unavailable(e: LuminaError) -> LuminaError {
    match e {
        LuminaError::SourceUnavailable(_) => e,
        other => LuminaError::source_unavailable(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/capture_session.rs"]
mod tests;
