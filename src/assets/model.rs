use std::fmt;

/// Stable identifier of a frame asset, unique within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FrameId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Rendering kind of a frame asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Vector markup (SVG) scaled to the output.
    VectorMarkup,
    /// Raster image fetched by URI and stretched to the output.
    RasterReference,
    /// No overlay; compositing is the identity.
    None,
}

/// How a raster reference is requested across origins.
///
/// Only readable modes let the composited surface be encoded afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossOrigin {
    /// CORS request without credentials; pixels stay readable.
    #[default]
    Anonymous,
    /// CORS request with credentials; pixels stay readable.
    UseCredentials,
    /// Plain request; a remote image taints the surface it is drawn on.
    Unset,
}

impl CrossOrigin {
    /// Whether pixels drawn from a remote source loaded this way can be read back.
    pub fn permits_readback(self) -> bool {
        !matches!(self, CrossOrigin::Unset)
    }
}

/// Kind-specific payload of a frame asset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameContent {
    /// No overlay.
    None,
    /// SVG markup authored against a 1080x1920 logical canvas.
    VectorMarkup {
        /// Raw markup text.
        markup: String,
    },
    /// Raster image reference (`data:` URI, file path, or `http(s)` URL).
    RasterReference {
        /// Where to load the image from.
        uri: String,
        /// Request mode for remote sources.
        #[serde(default)]
        cross_origin: CrossOrigin,
    },
}

impl FrameContent {
    /// Rendering kind for this payload.
    pub fn kind(&self) -> FrameKind {
        match self {
            FrameContent::None => FrameKind::None,
            FrameContent::VectorMarkup { .. } => FrameKind::VectorMarkup,
            FrameContent::RasterReference { .. } => FrameKind::RasterReference,
        }
    }
}

/// A selectable decorative overlay. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameAsset {
    id: FrameId,
    name: String,
    #[serde(flatten)]
    content: FrameContent,
}

impl FrameAsset {
    /// Build an asset from its parts.
    pub fn new(id: impl Into<FrameId>, name: impl Into<String>, content: FrameContent) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content,
        }
    }

    /// The "original, no frame" entry.
    pub fn none(id: impl Into<FrameId>, name: impl Into<String>) -> Self {
        Self::new(id, name, FrameContent::None)
    }

    /// A vector markup frame.
    pub fn vector(
        id: impl Into<FrameId>,
        name: impl Into<String>,
        markup: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            FrameContent::VectorMarkup {
                markup: markup.into(),
            },
        )
    }

    /// A raster frame requested in the default readable (anonymous) mode.
    pub fn raster(id: impl Into<FrameId>, name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            FrameContent::RasterReference {
                uri: uri.into(),
                cross_origin: CrossOrigin::Anonymous,
            },
        )
    }

    /// Identifier.
    pub fn id(&self) -> &FrameId {
        &self.id
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind-specific payload.
    pub fn content(&self) -> &FrameContent {
        &self.content
    }

    /// Rendering kind.
    pub fn kind(&self) -> FrameKind {
        self.content.kind()
    }
}

impl From<String> for FrameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&FrameId> for FrameId {
    fn from(id: &FrameId) -> Self {
        id.clone()
    }
}
