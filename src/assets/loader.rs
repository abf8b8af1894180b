use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;

use crate::assets::catalog::is_remote_uri;
use crate::assets::decode::decode_image;
use crate::assets::model::CrossOrigin;
use crate::foundation::error::{LuminaError, LuminaResult};
use crate::render::raster::PremulImage;

/// A raster frame request.
#[derive(Clone, Copy, Debug)]
pub struct RasterRequest<'a> {
    /// `data:` URI, `file://` URI, path, or `http(s)` URL.
    pub uri: &'a str,
    /// Request mode for remote sources.
    pub cross_origin: CrossOrigin,
}

/// A decoded raster plus whether its pixels may be read back after drawing.
#[derive(Clone, Debug)]
pub struct LoadedRaster {
    /// Decoded pixels at the source's native size.
    pub image: PremulImage,
    /// `false` for remote images fetched without CORS; drawing them taints the surface.
    pub readable: bool,
}

/// Asynchronously resolves raster frame references into decoded pixels.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Load and decode the raster behind `req`.
    async fn load_raster(&self, req: RasterRequest<'_>) -> LuminaResult<LoadedRaster>;
}

/// Loader for `data:` URIs, local files, and (with the `http` feature) remote URLs.
///
/// Relative paths resolve against `root`.
#[derive(Clone, Debug)]
pub struct DefaultAssetLoader {
    root: PathBuf,
    #[cfg(feature = "http")]
    client: reqwest::Client,
}

impl DefaultAssetLoader {
    /// Create a loader resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            #[cfg(feature = "http")]
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, uri: &str) -> LuminaResult<Vec<u8>> {
        if let Some(rest) = uri.strip_prefix("data:") {
            return decode_data_uri(rest);
        }
        if is_remote_uri(uri) {
            return self.fetch_remote(uri).await;
        }
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        let path = resolve_path(&self.root, Path::new(path));
        tokio::fs::read(&path).await.map_err(|e| {
            LuminaError::asset_load(format!("read frame image '{}': {e}", path.display()))
        })
    }

    #[cfg(feature = "http")]
    async fn fetch_remote(&self, uri: &str) -> LuminaResult<Vec<u8>> {
        let resp = self
            .client
            .get(uri)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| LuminaError::asset_load(format!("fetch frame image '{uri}': {e}")))?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| LuminaError::asset_load(format!("read frame image '{uri}': {e}")))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "http"))]
    async fn fetch_remote(&self, uri: &str) -> LuminaResult<Vec<u8>> {
        Err(LuminaError::asset_load(format!(
            "remote frame image '{uri}' requires the 'http' feature"
        )))
    }
}

#[async_trait]
impl AssetLoader for DefaultAssetLoader {
    #[tracing::instrument(level = "debug", skip_all, fields(remote = is_remote_uri(req.uri)))]
    async fn load_raster(&self, req: RasterRequest<'_>) -> LuminaResult<LoadedRaster> {
        let bytes = self.fetch(req.uri).await?;
        let image = decode_image(&bytes)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "frame image decoded"
        );
        Ok(LoadedRaster {
            image,
            readable: !is_remote_uri(req.uri) || req.cross_origin.permits_readback(),
        })
    }
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Decode the part of a `data:` URI after the scheme: `[<mime>][;base64],<payload>`.
///
/// Payloads without `;base64` are percent-decoded.
fn decode_data_uri(rest: &str) -> LuminaResult<Vec<u8>> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| LuminaError::asset_load("data uri is missing ','"))?;
    if meta.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| LuminaError::asset_load(format!("data uri base64: {e}")))
    } else {
        Ok(percent_encoding::percent_decode_str(payload).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
