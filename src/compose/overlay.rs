use std::sync::Arc;

use crate::assets::loader::{AssetLoader, RasterRequest};
use crate::assets::model::{FrameAsset, FrameContent, FrameKind};
use crate::assets::svg_raster::VectorDecoder;
use crate::compose::capture::{CapturedImage, capture_frame};
use crate::foundation::core::Canvas;
use crate::foundation::error::LuminaResult;
use crate::render::blend::over_in_place;
use crate::render::raster::PremulImage;
use crate::render::resize::resize_to;
use crate::source::video::VideoFrame;

/// Compositor configuration.
#[derive(Clone, Debug)]
pub struct CompositorOpts {
    /// Load system fonts so vector frames can render `<text>`.
    pub load_system_fonts: bool,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
        }
    }
}

/// What happened to the frame overlay during a composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// The asset was `None`; the capture passed through unchanged.
    Identity,
    /// The overlay of the given kind was drawn.
    Applied(FrameKind),
    /// The overlay failed to load or decode; the capture passed through unchanged.
    Fallback {
        /// Why the overlay was skipped.
        reason: String,
    },
}

/// A capture with zero or one frame drawn on top, at the capture's resolution.
///
/// Never cached: every export builds a fresh one.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    image: PremulImage,
    outcome: OverlayOutcome,
    tainted: bool,
}

impl CompositeResult {
    /// Composited pixels.
    pub fn image(&self) -> &PremulImage {
        &self.image
    }

    /// Resolution of the result.
    pub fn canvas(&self) -> Canvas {
        self.image.canvas()
    }

    /// How the overlay was handled.
    pub fn outcome(&self) -> &OverlayOutcome {
        &self.outcome
    }

    /// Whether pixels from a non-readable cross-origin source were drawn; such results cannot be
    /// encoded.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }
}

/// Captures live frames and draws frame assets over captured images.
pub struct Compositor {
    loader: Arc<dyn AssetLoader>,
    vectors: VectorDecoder,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("vectors", &self.vectors)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Create a compositor loading raster frames through `loader`.
    pub fn new(loader: Arc<dyn AssetLoader>, opts: CompositorOpts) -> Self {
        Self {
            loader,
            vectors: VectorDecoder::new(opts.load_system_fonts),
        }
    }

    /// Cover-crop a live frame into a `target`-sized capture.
    pub fn capture(&self, frame: &VideoFrame, target: Canvas) -> LuminaResult<CapturedImage> {
        capture_frame(frame, target)
    }

    /// Draw `asset` over `captured`.
    ///
    /// Never fails: when the overlay cannot be loaded or decoded the failure is logged and the
    /// result is the unmodified capture. Frame assets are never mirrored, even over a mirrored
    /// capture.
    #[tracing::instrument(level = "debug", skip_all, fields(frame = %asset.id()))]
    pub async fn composite(&self, captured: &CapturedImage, asset: &FrameAsset) -> CompositeResult {
        let mut image = captured.image().clone();
        let overlay = match self.load_overlay(asset.content(), captured.canvas()).await {
            Ok(overlay) => overlay,
            Err(e) => {
                tracing::warn!(
                    frame = %asset.id(),
                    error = %e,
                    "failed to load frame overlay, continuing without frame"
                );
                return CompositeResult {
                    image,
                    outcome: OverlayOutcome::Fallback {
                        reason: e.to_string(),
                    },
                    tainted: false,
                };
            }
        };

        let Some((layer, readable)) = overlay else {
            return CompositeResult {
                image,
                outcome: OverlayOutcome::Identity,
                tainted: false,
            };
        };

        // Decode has completed; drawing happens strictly after it and before any encode.
        if let Err(e) = over_in_place(&mut image, &layer) {
            tracing::warn!(error = %e, "frame overlay size mismatch, continuing without frame");
            return CompositeResult {
                image: captured.image().clone(),
                outcome: OverlayOutcome::Fallback {
                    reason: e.to_string(),
                },
                tainted: false,
            };
        }
        CompositeResult {
            image,
            outcome: OverlayOutcome::Applied(asset.kind()),
            tainted: !readable,
        }
    }

    /// Resolve the overlay layer at `canvas` size, plus whether its pixels are readable.
    async fn load_overlay(
        &self,
        content: &FrameContent,
        canvas: Canvas,
    ) -> LuminaResult<Option<(PremulImage, bool)>> {
        match content {
            FrameContent::None => Ok(None),
            FrameContent::VectorMarkup { markup } => {
                let layer = self.vectors.rasterize(markup, canvas)?;
                Ok(Some((layer, true)))
            }
            FrameContent::RasterReference { uri, cross_origin } => {
                let loaded = self
                    .loader
                    .load_raster(RasterRequest {
                        uri,
                        cross_origin: *cross_origin,
                    })
                    .await?;
                Ok(Some((resize_to(&loaded.image, canvas)?, loaded.readable)))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/overlay.rs"]
mod tests;
