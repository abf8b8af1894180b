//! Export: PNG encoding and the download/share sinks.

/// PNG encoding of composited surfaces.
pub mod encode;
/// Export sink trait, filenames and built-in sinks.
pub mod sink;
