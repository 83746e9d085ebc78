use crate::assets::source::SourceImage;
use crate::foundation::core::Size;
use crate::foundation::error::HalftoneResult;
use crate::halftone::params::RenderParameters;
use crate::halftone::plan::{HalftonePlan, compile_plan};

/// A rendered surface as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

/// Counters for one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Grid samples visited.
    pub samples: u64,
    /// Samples whose shape had a positive size.
    pub painted: u64,
}

/// A 2D drawing target for halftone plans.
///
/// Implementations own their pixels. `draw_plan` must paint the whole plan before returning so
/// that callers never observe a half-painted surface.
pub trait RenderSurface {
    /// Current surface size.
    fn size(&self) -> Size;

    /// Resize to `size`. Contents after a resize are unspecified until the next `clear`.
    fn resize(&mut self, size: Size) -> HalftoneResult<()>;

    /// Erase everything to fully transparent.
    fn clear(&mut self);

    /// Paint every visible op of `plan` in order, using the plan's color and shape.
    fn draw_plan(&mut self, plan: &HalftonePlan) -> HalftoneResult<()>;

    /// Copy the current pixels out.
    fn readback(&self) -> FrameRGBA;
}

/// Run one full render pass: validate, resize `target` to `source`, clear, then draw.
///
/// Parameter validation happens before `target` is touched, so a rejected call leaves the
/// previous contents intact.
#[tracing::instrument(skip(source, params, target), fields(w = source.width(), h = source.height()))]
pub fn render_halftone(
    source: &SourceImage,
    params: &RenderParameters,
    target: &mut dyn RenderSurface,
) -> HalftoneResult<RenderStats> {
    let settings = params.validate()?;
    let plan = compile_plan(source, &settings);

    if target.size() != source.size() {
        target.resize(source.size())?;
    }
    target.clear();
    target.draw_plan(&plan)?;

    let stats = RenderStats {
        samples: plan.sample_count(),
        painted: plan.visible_count(),
    };
    tracing::debug!(
        samples = stats.samples,
        painted = stats.painted,
        spacing = settings.spacing(),
        "halftone pass complete"
    );
    Ok(stats)
}
