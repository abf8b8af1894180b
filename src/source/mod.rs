//! Video sources feeding the capture step.

/// Video-file source backed by `ffprobe`/`ffmpeg`.
pub mod ffmpeg;
/// A still image standing in for a live camera.
pub mod still;
/// Source trait, facing mode and frame type.
pub mod video;
