//! The compositing pipeline: cover-crop capture and frame overlay.

/// Capture a live frame into a fixed-resolution image.
pub mod capture;
/// Cover-fit placement math.
pub mod geometry;
/// Draw a frame asset over a captured image.
pub mod overlay;
