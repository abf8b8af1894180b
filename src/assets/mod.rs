//! Frame assets: the catalog model plus loading, decoding and generation.

/// Ordered catalog with the active selection.
pub mod catalog;
/// Byte-level decoders for raster and vector assets.
pub mod decode;
/// Turning generated markup into catalog assets.
pub mod generate;
/// Raster asset loading by URI.
pub mod loader;
/// Frame asset model types.
pub mod model;
/// Vector markup rasterization.
pub mod svg_raster;
