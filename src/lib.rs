//! Halftone image stylization.
//!
//! A source image is sampled on a regular grid; each sample's brightness (a single color
//! channel) sets the size of a dot or square drawn at that position. Dark samples get large
//! shapes, near-white samples vanish.
//!
//! - Decode and fit an image with [`decode_source_image`]
//! - Render it with [`render_halftone`] onto any [`RenderSurface`], or drive everything through a
//!   [`HalftoneSession`]
//! - Export the surface with [`encode_png`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod halftone;

/// PNG export.
pub mod encode;
/// Drawing surfaces.
pub mod render;
/// Session-oriented API.
pub mod session;

pub use crate::assets::color::FillColor;
pub use crate::assets::decode::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, LoaderOpts, bounded_fit, decode_source_image,
    load_source_image,
};
pub use crate::assets::source::SourceImage;
pub use crate::foundation::core::{Point, Rect, Rgba8, Rgba8Premul, Size};
pub use crate::foundation::error::{HalftoneError, HalftoneResult};
pub use crate::halftone::params::{BrightnessChannel, GridSettings, RenderParameters, Shape};
pub use crate::halftone::plan::{
    DotOp, HalftonePlan, Sample, SampleGrid, compile_plan, dot_radius, sample_count,
};

pub use crate::encode::png::{EXPORT_FILE_NAME, encode_png, png_data_url, write_png};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::surface::{FrameRGBA, RenderStats, RenderSurface, render_halftone};
pub use crate::session::halftone_session::HalftoneSession;
