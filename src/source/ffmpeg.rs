use std::path::PathBuf;

use async_trait::async_trait;

use crate::foundation::error::{LuminaError, LuminaResult};
use crate::source::video::{FacingMode, VideoFrame, VideoSource};
#[cfg(feature = "media-ffmpeg")]
use crate::render::raster::PremulImage;

/// Basic metadata about a source video file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFileInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Treats a video file as a camera: every grab decodes the frame at a fixed timestamp.
///
/// Requires the `media-ffmpeg` feature and `ffprobe`/`ffmpeg` on `PATH`.
#[derive(Clone, Debug)]
pub struct FfmpegVideoSource {
    path: PathBuf,
    time_sec: f64,
    running: Option<(FacingMode, VideoFileInfo)>,
}

impl FfmpegVideoSource {
    /// Capture from `path` at `time_sec` seconds into the video.
    pub fn new(path: impl Into<PathBuf>, time_sec: f64) -> Self {
        Self {
            path: path.into(),
            time_sec: time_sec.max(0.0),
            running: None,
        }
    }
}

#[async_trait]
impl VideoSource for FfmpegVideoSource {
    async fn start(&mut self, facing: FacingMode) -> LuminaResult<()> {
        self.running = None;
        let info = probe_video(&self.path).await?;
        tracing::debug!(
            path = %self.path.display(),
            width = info.width,
            height = info.height,
            "video source probed"
        );
        self.running = Some((facing, info));
        Ok(())
    }

    fn stop(&mut self) {
        self.running = None;
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    async fn grab_frame(&mut self) -> LuminaResult<VideoFrame> {
        let (facing, info) = self
            .running
            .clone()
            .ok_or_else(|| LuminaError::source_unavailable("video stream is not running"))?;
        let image = decode_frame(&self.path, &info, self.time_sec).await?;
        Ok(VideoFrame { image, facing })
    }
}

#[cfg(feature = "media-ffmpeg")]
async fn probe_video(path: &std::path::Path) -> LuminaResult<VideoFileInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = tokio::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .await
        .map_err(|e| LuminaError::source_unavailable(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(LuminaError::source_unavailable(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout).map_err(|e| {
        LuminaError::source_unavailable(format!("ffprobe json parse failed: {e}"))
    })?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| LuminaError::source_unavailable("no video stream found"))?;
    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Ok(VideoFileInfo { width, height })
        }
        _ => Err(LuminaError::source_unavailable(
            "missing video dimensions from ffprobe",
        )),
    }
}

#[cfg(feature = "media-ffmpeg")]
async fn decode_frame(
    path: &std::path::Path,
    info: &VideoFileInfo,
    time_sec: f64,
) -> LuminaResult<PremulImage> {
    let out = tokio::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{time_sec:.6}")])
        .arg("-i")
        .arg(path)
        .args(["-frames:v", "1", "-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
        .output()
        .await
        .map_err(|e| LuminaError::source_unavailable(format!("failed to run ffmpeg: {e}")))?;
    if !out.status.success() {
        return Err(LuminaError::source_unavailable(format!(
            "ffmpeg frame decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected_len = info.width as usize * info.height as usize * 4;
    if out.stdout.len() < expected_len {
        return Err(LuminaError::source_unavailable(format!(
            "decoded frame has {} bytes, expected {expected_len}",
            out.stdout.len()
        )));
    }
    let mut rgba = out.stdout;
    rgba.truncate(expected_len);
    PremulImage::from_straight_rgba(info.width, info.height, rgba)
}

#[cfg(not(feature = "media-ffmpeg"))]
async fn probe_video(_path: &std::path::Path) -> LuminaResult<VideoFileInfo> {
    Err(LuminaError::source_unavailable(
        "video file sources require the 'media-ffmpeg' feature",
    ))
}

#[cfg(not(feature = "media-ffmpeg"))]
async fn decode_frame(
    _path: &std::path::Path,
    _info: &VideoFileInfo,
    _time_sec: f64,
) -> LuminaResult<crate::render::raster::PremulImage> {
    Err(LuminaError::source_unavailable(
        "video file sources require the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/source/ffmpeg.rs"]
mod tests;
