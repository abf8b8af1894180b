//! Lumina captures a photo from a camera-like source, lays a decorative frame over it and exports
//! the result as a PNG.
//!
//! The pipeline is deterministic and fixed-resolution:
//!
//! - Pick a frame from a [`FrameCatalog`] (vector markup, raster reference or none)
//! - Cover-crop a [`VideoFrame`] into a [`CapturedImage`], mirrored for user-facing cameras
//! - Composite the active frame over it with a [`Compositor`]
//! - Download or share the PNG through an [`ExportSink`]
//!
//! [`Session`] ties these together as explicit per-user state.
#![forbid(unsafe_code)]

mod foundation;

/// Frame assets: catalog, loading, decoding and generation.
pub mod assets;
/// Capture and overlay compositing.
pub mod compose;
/// PNG encoding and export sinks.
pub mod export;
/// CPU raster primitives.
pub mod render;
/// Session state.
pub mod session;
/// Video sources.
pub mod source;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Size};
pub use crate::foundation::error::{LuminaError, LuminaResult};

pub use crate::assets::catalog::{FrameCatalog, NONE_FRAME_ID};
pub use crate::assets::generate::FrameGenerator;
pub use crate::assets::loader::{AssetLoader, DefaultAssetLoader, LoadedRaster, RasterRequest};
pub use crate::assets::model::{CrossOrigin, FrameAsset, FrameContent, FrameId, FrameKind};
pub use crate::compose::capture::CapturedImage;
pub use crate::compose::geometry::CoverFit;
pub use crate::compose::overlay::{CompositeResult, Compositor, CompositorOpts, OverlayOutcome};
pub use crate::export::sink::{
    Clock, DirectorySink, ExportFile, ExportSink, InMemorySink, ShareMeta, ShareOutcome,
    SystemClock,
};
pub use crate::render::raster::PremulImage;
pub use crate::session::capture_session::{Mode, Session, SessionOpts};
pub use crate::source::ffmpeg::FfmpegVideoSource;
pub use crate::source::still::StillFrameSource;
pub use crate::source::video::{FacingMode, VideoFrame, VideoSource};
