//! Export of rendered surfaces.

/// PNG serialization, `data:` URLs and file output.
pub mod png;
