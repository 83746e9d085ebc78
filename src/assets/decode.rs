use std::path::Path;

use anyhow::Context;
use image::imageops::FilterType;

use crate::assets::source::SourceImage;
use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{HalftoneError, HalftoneResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// Default cap for the dominant dimension of landscape images.
pub const DEFAULT_MAX_WIDTH: u32 = 900;
/// Default cap for the dominant dimension of portrait and square images.
pub const DEFAULT_MAX_HEIGHT: u32 = 700;

const ENV_MAX_WIDTH: &str = "HALFTONE_MAX_WIDTH";
const ENV_MAX_HEIGHT: &str = "HALFTONE_MAX_HEIGHT";

/// Image loader configuration.
#[derive(Clone, Copy, Debug)]
pub struct LoaderOpts {
    /// Width assigned to images wider than tall.
    pub max_width: u32,
    /// Height assigned to images at least as tall as wide.
    pub max_height: u32,
    /// Resampling filter used by the bounded-fit resize.
    pub filter: FilterType,
}

impl Default for LoaderOpts {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            filter: FilterType::Triangle,
        }
    }
}

impl LoaderOpts {
    /// Defaults, overridden by `HALFTONE_MAX_WIDTH` / `HALFTONE_MAX_HEIGHT` when they hold
    /// positive integers.
    pub fn from_env() -> Self {
        fn read(var: &str) -> Option<u32> {
            std::env::var(var)
                .ok()
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|&n| n > 0)
        }

        let mut opts = Self::default();
        if let Some(w) = read(ENV_MAX_WIDTH) {
            opts.max_width = w;
        }
        if let Some(h) = read(ENV_MAX_HEIGHT) {
            opts.max_height = h;
        }
        opts
    }

    pub fn validate(&self) -> HalftoneResult<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(HalftoneError::invalid_parameter(format!(
                "loader maxima must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}

/// Scale `(width, height)` so the dominant dimension lands exactly on its maximum.
///
/// Only the dominant dimension is clamped: a landscape image always becomes `max_width` wide and
/// its height may still exceed `max_height` (e.g. 900x800 stays 900x800). Fractional results are
/// truncated, as drawing-surface dimensions are integral.
pub fn bounded_fit(width: u32, height: u32, opts: &LoaderOpts) -> HalftoneResult<Size> {
    opts.validate()?;
    if width == 0 || height == 0 {
        return Err(HalftoneError::decode(format!(
            "image has zero-sized dimension {width}x{height}"
        )));
    }

    let aspect = f64::from(width) / f64::from(height);
    let (fit_w, fit_h) = if width > height {
        let w = f64::from(opts.max_width);
        (w, w / aspect)
    } else {
        let h = f64::from(opts.max_height);
        (h * aspect, h)
    };

    let (w, h) = (fit_w.trunc() as u32, fit_h.trunc() as u32);
    if w == 0 || h == 0 {
        return Err(HalftoneError::decode(format!(
            "aspect ratio of {width}x{height} collapses to {w}x{h} after fitting"
        )));
    }
    Size::new(w, h)
}

/// Decode encoded image bytes into a fitted [`SourceImage`].
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_source_image(bytes: &[u8], opts: &LoaderOpts) -> HalftoneResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| HalftoneError::decode(format!("decode image from memory: {e}")))?;
    let (natural_w, natural_h) = (dyn_img.width(), dyn_img.height());

    let fit = bounded_fit(natural_w, natural_h, opts)?;
    tracing::debug!(
        natural_w,
        natural_h,
        fit_w = fit.width,
        fit_h = fit.height,
        "fitted source image"
    );

    let rgba = if (natural_w, natural_h) == (fit.width, fit.height) {
        dyn_img.to_rgba8()
    } else {
        dyn_img
            .resize_exact(fit.width, fit.height, opts.filter)
            .to_rgba8()
    };

    let (w, h) = rgba.dimensions();
    let mut rgba8 = rgba.into_raw();
    surface_readback_in_place(&mut rgba8);
    SourceImage::from_rgba8(w, h, rgba8)
}

/// Pass straight RGBA8 through premultiplied storage and back, as reading pixels off a
/// drawing surface does. Color under zero alpha is lost: `(r, g, b, 0)` reads as `(0, 0, 0, 0)`.
pub(crate) fn surface_readback_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let premul = Rgba8::new(px[0], px[1], px[2], px[3]).premultiplied();
        px.copy_from_slice(&premul.to_array());
    }
    unpremultiply_rgba8_in_place(rgba);
}

/// Read and decode an image file.
pub fn load_source_image(path: impl AsRef<Path>, opts: &LoaderOpts) -> HalftoneResult<SourceImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_source_image(&bytes, opts)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
