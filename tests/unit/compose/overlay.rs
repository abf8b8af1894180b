use async_trait::async_trait;

use super::*;
use crate::assets::loader::LoadedRaster;
use crate::assets::model::CrossOrigin;
use crate::foundation::error::LuminaError;

/// Serves a fixed 2x2 half-transparent raster for `ok://` URIs and fails for everything else.
struct FakeLoader;

#[async_trait]
impl AssetLoader for FakeLoader {
    async fn load_raster(&self, req: RasterRequest<'_>) -> LuminaResult<LoadedRaster> {
        if !req.uri.starts_with("ok://") {
            return Err(LuminaError::asset_load(format!("no such frame '{}'", req.uri)));
        }
        let mut data = Vec::new();
        data.extend_from_slice(&[255, 255, 255, 255]);
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0, 0]);
        Ok(LoadedRaster {
            image: PremulImage::new(2, 2, data).unwrap(),
            readable: req.cross_origin.permits_readback(),
        })
    }
}

fn compositor() -> Compositor {
    Compositor::new(
        Arc::new(FakeLoader),
        CompositorOpts {
            load_system_fonts: false,
        },
    )
}

fn captured(canvas: Canvas) -> CapturedImage {
    CapturedImage::from_image(PremulImage::filled(canvas, [0, 0, 128, 255]), canvas).unwrap()
}

#[tokio::test]
async fn none_asset_is_bit_identical() {
    let cap = captured(Canvas::new(8, 8).unwrap());
    let out = compositor()
        .composite(&cap, &FrameAsset::none("none", "Original"))
        .await;
    assert_eq!(out.image(), cap.image());
    assert_eq!(out.outcome(), &OverlayOutcome::Identity);
    assert!(!out.is_tainted());
}

#[tokio::test]
async fn raster_overlay_is_stretched_over_capture() {
    let canvas = Canvas::new(8, 8).unwrap();
    let cap = captured(canvas);
    let out = compositor()
        .composite(&cap, &FrameAsset::raster("r", "R", "ok://frame"))
        .await;
    assert_eq!(out.canvas(), canvas);
    assert_eq!(out.outcome(), &OverlayOutcome::Applied(FrameKind::RasterReference));
    // Top-left quadrant is the opaque white texel, bottom-right is transparent.
    assert_eq!(out.image().pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(out.image().pixel(7, 7), [0, 0, 128, 255]);
}

#[tokio::test]
async fn raster_load_failure_falls_back_to_capture() {
    let cap = captured(Canvas::new(8, 8).unwrap());
    let out = compositor()
        .composite(&cap, &FrameAsset::raster("r", "R", "missing://frame"))
        .await;
    assert_eq!(out.image(), cap.image());
    assert!(matches!(out.outcome(), OverlayOutcome::Fallback { reason } if reason.contains("missing://frame")));
}

#[tokio::test]
async fn vector_overlay_renders_at_capture_resolution() {
    let canvas = Canvas::new(27, 48).unwrap();
    let cap = captured(canvas);
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1080 1920" width="1080" height="1920">
        <rect x="0" y="0" width="1080" height="200" fill="#00ff00"/>
    </svg>"##;
    let out = compositor()
        .composite(&cap, &FrameAsset::vector("v", "V", markup))
        .await;
    assert_eq!(out.outcome(), &OverlayOutcome::Applied(FrameKind::VectorMarkup));
    assert_eq!(out.canvas(), canvas);
    assert_eq!(out.image().pixel(13, 1), [0, 255, 0, 255]);
    assert_eq!(out.image().pixel(13, 30), [0, 0, 128, 255]);
}

#[tokio::test]
async fn broken_vector_markup_falls_back_to_capture() {
    let cap = captured(Canvas::new(6, 6).unwrap());
    let out = compositor()
        .composite(&cap, &FrameAsset::vector("v", "V", "<svg"))
        .await;
    assert_eq!(out.image(), cap.image());
    assert!(matches!(out.outcome(), OverlayOutcome::Fallback { .. }));
}

#[tokio::test]
async fn unreadable_cross_origin_raster_taints_result() {
    let cap = captured(Canvas::new(4, 4).unwrap());
    let asset = FrameAsset::new(
        "r",
        "R",
        FrameContent::RasterReference {
            uri: "ok://remote".to_string(),
            cross_origin: CrossOrigin::Unset,
        },
    );
    let out = compositor().composite(&cap, &asset).await;
    assert!(out.is_tainted());
}

#[tokio::test]
async fn frame_is_not_mirrored_over_mirrored_capture() {
    use crate::source::video::{FacingMode, VideoFrame};

    let canvas = Canvas::new(8, 8).unwrap();
    let frame = VideoFrame {
        image: PremulImage::filled(canvas, [0, 0, 128, 255]),
        facing: FacingMode::User,
    };
    let c = compositor();
    let cap = c.capture(&frame, canvas).unwrap();
    assert!(cap.is_mirrored());
    let out = c
        .composite(&cap, &FrameAsset::raster("r", "R", "ok://frame"))
        .await;
    assert_eq!(out.image().pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(out.image().pixel(7, 0), [0, 0, 128, 255]);
}
