use std::path::Path;

use crate::assets::decode::{LoaderOpts, decode_source_image, load_source_image};
use crate::assets::source::SourceImage;
use crate::encode::png::{encode_png, png_data_url, write_png};
use crate::foundation::error::{HalftoneError, HalftoneResult};
use crate::halftone::params::RenderParameters;
use crate::render::cpu::CpuSurface;
use crate::render::surface::{FrameRGBA, RenderStats, RenderSurface, render_halftone};

/// Owns at most one [`SourceImage`], the current [`RenderParameters`] and the drawing surface.
///
/// Every call runs to completion before returning; there is no background work. A new upload
/// replaces the previous image wholesale, and every render repaints the surface from scratch.
pub struct HalftoneSession<S: RenderSurface = CpuSurface> {
    loader: LoaderOpts,
    params: RenderParameters,
    source: Option<SourceImage>,
    surface: S,
    last_stats: Option<RenderStats>,
}

impl HalftoneSession<CpuSurface> {
    /// Session with a blank default-sized CPU surface and default parameters.
    pub fn new(loader: LoaderOpts) -> Self {
        Self::with_surface(loader, CpuSurface::blank())
    }
}

impl Default for HalftoneSession<CpuSurface> {
    fn default() -> Self {
        Self::new(LoaderOpts::default())
    }
}

impl<S: RenderSurface> HalftoneSession<S> {
    /// Session drawing onto a caller-provided surface.
    pub fn with_surface(loader: LoaderOpts, surface: S) -> Self {
        Self {
            loader,
            params: RenderParameters::default(),
            source: None,
            surface,
            last_stats: None,
        }
    }

    /// Builder-style parameter override; validates without rendering.
    pub fn with_params(mut self, params: RenderParameters) -> HalftoneResult<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// True once an image has been loaded.
    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    /// Stats of the last completed render pass, if any.
    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }

    /// Decode `bytes`, make it the current image and render it with the current parameters.
    ///
    /// On decode failure the previous image (if any) stays current and the session remains
    /// usable.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_image(&mut self, bytes: &[u8]) -> HalftoneResult<RenderStats> {
        let source = decode_source_image(bytes, &self.loader)?;
        self.install(source)
    }

    /// Read and load an image file. See [`Self::load_image`].
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> HalftoneResult<RenderStats> {
        let source = load_source_image(path, &self.loader)?;
        self.install(source)
    }

    /// Make an already decoded image current and render it.
    pub fn set_source(&mut self, source: SourceImage) -> HalftoneResult<RenderStats> {
        self.install(source)
    }

    fn install(&mut self, source: SourceImage) -> HalftoneResult<RenderStats> {
        self.surface.resize(source.size())?;
        self.surface.clear();
        self.source = Some(source);
        self.last_stats = None;
        self.render()
    }

    /// Replace the parameters and re-render.
    ///
    /// Invalid parameters are rejected and the previous ones kept. Valid parameters are stored
    /// even when no image is loaded yet; the render then reports `NotReady`.
    pub fn set_params(&mut self, params: RenderParameters) -> HalftoneResult<RenderStats> {
        params.validate()?;
        self.params = params;
        self.render()
    }

    /// Repaint the surface from the current image and parameters.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self) -> HalftoneResult<RenderStats> {
        let Some(source) = self.source.as_ref() else {
            tracing::warn!("render requested before an image was loaded");
            return Err(HalftoneError::not_ready(
                "an image must be loaded before rendering",
            ));
        };

        let stats = render_halftone(source, &self.params, &mut self.surface)?;
        self.last_stats = Some(stats);
        Ok(stats)
    }

    /// Current surface pixels, available once a render pass completed.
    pub fn frame(&self) -> HalftoneResult<FrameRGBA> {
        self.ensure_rendered()?;
        Ok(self.surface.readback())
    }

    /// Encode the current surface as PNG.
    #[tracing::instrument(skip(self))]
    pub fn export_png(&self) -> HalftoneResult<Vec<u8>> {
        let frame = self.frame()?;
        encode_png(&frame)
    }

    /// Encode the current surface as a `data:image/png;base64,...` URL.
    pub fn export_data_url(&self) -> HalftoneResult<String> {
        Ok(png_data_url(&self.export_png()?))
    }

    /// Encode the current surface and write it to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> HalftoneResult<()> {
        let png = self.export_png()?;
        write_png(path, &png)
    }

    fn ensure_rendered(&self) -> HalftoneResult<()> {
        if self.last_stats.is_none() {
            tracing::warn!("export requested before a render pass completed");
            return Err(HalftoneError::not_ready(
                "an image must be loaded and rendered before exporting",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/halftone_session.rs"]
mod tests;
