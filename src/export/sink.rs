use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::Context as _;
use async_trait::async_trait;

use crate::foundation::error::LuminaResult;

/// Prefix of downloaded photo filenames.
pub const DOWNLOAD_PREFIX: &str = "lumina-photo-";
/// Title attached to every share.
pub const SHARE_TITLE: &str = "LuminaCam Photo";
/// Filename of the shared file.
pub const SHARE_FILE_NAME: &str = "photo.png";

/// Download filename for a timestamp: `lumina-photo-<epoch-millis>.png`.
pub fn download_filename(epoch_millis: i64) -> String {
    format!("{DOWNLOAD_PREFIX}{epoch_millis}.png")
}

/// Wall-clock source for download filenames.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// The system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// An encoded file handed to a sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested filename.
    pub name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// Metadata accompanying a share.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ShareMeta {
    /// Share sheet title.
    pub title: String,
}

impl Default for ShareMeta {
    fn default() -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
        }
    }
}

/// Result of a share attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The share target accepted the file.
    Shared,
    /// No share capability exists on this platform.
    Unsupported,
    /// The share capability exists but the invocation failed (including user cancel).
    Failed(String),
}

/// Where finished photos go.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Persist `file` on the user's side.
    async fn download(&self, file: ExportFile) -> LuminaResult<()>;

    /// Offer `file` to the platform share capability.
    async fn share(&self, file: ExportFile, meta: &ShareMeta) -> ShareOutcome;
}

/// Writes downloads into a directory; shares go to an optional outbox directory.
///
/// Without an outbox, sharing is unsupported.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    downloads: PathBuf,
    outbox: Option<PathBuf>,
}

impl DirectorySink {
    /// Sink saving into `downloads` with sharing unsupported.
    pub fn new(downloads: impl Into<PathBuf>) -> Self {
        Self {
            downloads: downloads.into(),
            outbox: None,
        }
    }

    /// Enable sharing into `outbox`: the file plus a `share.json` manifest with the metadata.
    pub fn with_outbox(mut self, outbox: impl Into<PathBuf>) -> Self {
        self.outbox = Some(outbox.into());
        self
    }

    async fn write_share(
        &self,
        outbox: &std::path::Path,
        file: &ExportFile,
        meta: &ShareMeta,
    ) -> anyhow::Result<()> {
        #[derive(serde::Serialize)]
        struct Manifest<'a> {
            title: &'a str,
            files: [&'a str; 1],
            mime: &'a str,
        }

        tokio::fs::create_dir_all(outbox)
            .await
            .with_context(|| format!("create share outbox '{}'", outbox.display()))?;
        tokio::fs::write(outbox.join(&file.name), &file.bytes)
            .await
            .with_context(|| format!("write shared file '{}'", file.name))?;
        let manifest = serde_json::to_vec_pretty(&Manifest {
            title: &meta.title,
            files: [file.name.as_str()],
            mime: file.mime,
        })?;
        tokio::fs::write(outbox.join("share.json"), manifest)
            .await
            .context("write share manifest")?;
        Ok(())
    }
}

#[async_trait]
impl ExportSink for DirectorySink {
    async fn download(&self, file: ExportFile) -> LuminaResult<()> {
        tokio::fs::create_dir_all(&self.downloads)
            .await
            .with_context(|| format!("create output dir '{}'", self.downloads.display()))?;
        let path = self.downloads.join(&file.name);
        tokio::fs::write(&path, &file.bytes)
            .await
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = file.bytes.len(), "photo saved");
        Ok(())
    }

    async fn share(&self, file: ExportFile, meta: &ShareMeta) -> ShareOutcome {
        let Some(outbox) = self.outbox.as_deref() else {
            return ShareOutcome::Unsupported;
        };
        match self.write_share(outbox, &file, meta).await {
            Ok(()) => {
                tracing::info!(outbox = %outbox.display(), title = %meta.title, "photo shared");
                ShareOutcome::Shared
            }
            Err(e) => ShareOutcome::Failed(format!("{e:#}")),
        }
    }
}

/// Records exports in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    share: Option<ShareOutcome>,
    downloads: Mutex<Vec<ExportFile>>,
    shares: Mutex<Vec<(ExportFile, ShareMeta)>>,
}

impl InMemorySink {
    /// A sink without share capability.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose share capability answers with `outcome` (after recording the file).
    pub fn with_share_outcome(outcome: ShareOutcome) -> Self {
        Self {
            share: Some(outcome),
            ..Self::default()
        }
    }

    /// Downloads received so far, in call order.
    pub fn downloads(&self) -> Vec<ExportFile> {
        self.downloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shares received so far, in call order.
    pub fn shares(&self) -> Vec<(ExportFile, ShareMeta)> {
        self.shares
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ExportSink for InMemorySink {
    async fn download(&self, file: ExportFile) -> LuminaResult<()> {
        self.downloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(file);
        Ok(())
    }

    async fn share(&self, file: ExportFile, meta: &ShareMeta) -> ShareOutcome {
        let Some(outcome) = self.share.clone() else {
            return ShareOutcome::Unsupported;
        };
        self.shares
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((file, meta.clone()));
        outcome
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
