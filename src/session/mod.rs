//! Session-oriented API: one current image, one parameter set, one surface.

/// [`HalftoneSession`](crate::HalftoneSession) and its options.
pub mod halftone_session;
