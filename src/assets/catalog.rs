use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::model::{FrameAsset, FrameContent, FrameId};
use crate::foundation::error::{LuminaError, LuminaResult};

/// Id of the built-in "no frame" entry.
pub const NONE_FRAME_ID: &str = "none";

/// Ordered set of selectable frames plus the single active selection.
///
/// Order is insertion order and never changes. Assets are never removed; new ones only enter
/// through [`FrameCatalog::append`].
#[derive(Clone, Debug)]
pub struct FrameCatalog {
    assets: Vec<FrameAsset>,
    active: usize,
}

/// JSON shape of a catalog file.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDef {
    /// Initially active frame; defaults to the first entry.
    #[serde(default)]
    default: Option<FrameId>,
    frames: Vec<FrameAsset>,
}

impl FrameCatalog {
    /// Build a catalog from a fixed list. The first entry becomes active.
    pub fn new(assets: Vec<FrameAsset>) -> LuminaResult<Self> {
        if assets.is_empty() {
            return Err(LuminaError::validation(
                "frame catalog must contain at least one asset",
            ));
        }
        let mut catalog = Self {
            assets: Vec::with_capacity(assets.len()),
            active: 0,
        };
        for asset in assets {
            catalog.append(asset)?;
        }
        Ok(catalog)
    }

    /// The stock frames: four remote PNG overlays followed by the "Original" entry.
    pub fn builtin() -> Self {
        let assets = vec![
            FrameAsset::raster("frame-1", "Frame 1", "https://iili.io/fzGjb9f.png"),
            FrameAsset::raster("frame-2", "Frame 2", "https://iili.io/fzGjQFn.png"),
            FrameAsset::raster("frame-3", "Frame 3", "https://iili.io/fzGjt8G.png"),
            FrameAsset::raster("frame-4", "Frame 4", "https://iili.io/fzGjZas.png"),
            FrameAsset::none(NONE_FRAME_ID, "Original"),
        ];
        Self { assets, active: 0 }
    }

    /// Parse a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LuminaResult<Self> {
        let def: CatalogDef = serde_json::from_reader(r)
            .map_err(|e| LuminaError::validation(format!("parse frame catalog JSON: {e}")))?;
        let mut catalog = Self::new(def.frames)?;
        if let Some(id) = def.default {
            catalog.set_active(id.as_str())?;
        }
        Ok(catalog)
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LuminaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LuminaError::validation(format!("open frame catalog '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// All assets in stable catalog order.
    pub fn list(&self) -> &[FrameAsset] {
        &self.assets
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always `false`: a catalog holds at least one asset.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an asset by id.
    pub fn get(&self, id: &str) -> Option<&FrameAsset> {
        self.assets.iter().find(|a| a.id().as_str() == id)
    }

    /// The currently active asset.
    pub fn active(&self) -> &FrameAsset {
        &self.assets[self.active]
    }

    /// Make `id` the active asset.
    ///
    /// Unknown ids fail with [`LuminaError::NotFound`] and leave the selection unchanged.
    pub fn set_active(&mut self, id: &str) -> LuminaResult<&FrameAsset> {
        let idx = self
            .assets
            .iter()
            .position(|a| a.id().as_str() == id)
            .ok_or_else(|| LuminaError::not_found(id))?;
        self.active = idx;
        tracing::debug!(frame = id, "active frame changed");
        Ok(&self.assets[idx])
    }

    /// Append a new asset at the end of the catalog.
    pub fn append(&mut self, asset: FrameAsset) -> LuminaResult<&FrameAsset> {
        validate_asset(&asset)?;
        if self.get(asset.id().as_str()).is_some() {
            return Err(LuminaError::validation(format!(
                "duplicate frame id '{}'",
                asset.id()
            )));
        }
        self.assets.push(asset);
        Ok(&self.assets[self.assets.len() - 1])
    }
}

impl Default for FrameCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_asset(asset: &FrameAsset) -> LuminaResult<()> {
    if asset.id().as_str().trim().is_empty() {
        return Err(LuminaError::validation("frame id must be non-empty"));
    }
    match asset.content() {
        FrameContent::None => Ok(()),
        FrameContent::VectorMarkup { markup } => {
            if markup.trim().is_empty() {
                return Err(LuminaError::validation(format!(
                    "frame '{}' has empty markup",
                    asset.id()
                )));
            }
            Ok(())
        }
        FrameContent::RasterReference { uri, cross_origin } => {
            if uri.trim().is_empty() {
                return Err(LuminaError::validation(format!(
                    "frame '{}' has empty uri",
                    asset.id()
                )));
            }
            if is_remote_uri(uri) && !cross_origin.permits_readback() {
                return Err(LuminaError::validation(format!(
                    "remote frame '{}' must be requested in a readable cross-origin mode",
                    asset.id()
                )));
            }
            Ok(())
        }
    }
}

/// `true` for `http://` and `https://` references.
pub(crate) fn is_remote_uri(uri: &str) -> bool {
    let lower = uri.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
