//! CPU raster primitives shared by capture and overlay compositing.

/// Source-over blending of premultiplied pixels.
pub mod blend;
/// Premultiplied RGBA8 raster buffer.
pub mod raster;
/// Filtered resizing, cropping and mirroring.
pub mod resize;
