use kurbo::Shape as _;

use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{HalftoneError, HalftoneResult};
use crate::halftone::params::Shape;
use crate::halftone::plan::{DotOp, HalftonePlan};
use crate::render::surface::{FrameRGBA, RenderSurface};

/// Size of a drawing surface nobody has sized yet.
pub const DEFAULT_SURFACE_WIDTH: u32 = 300;
/// See [`DEFAULT_SURFACE_WIDTH`].
pub const DEFAULT_SURFACE_HEIGHT: u32 = 150;

// Flattening tolerance for circle outlines, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU raster surface powered by `vello_cpu` (premultiplied RGBA8).
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    /// A transparent surface of `size`. Each dimension must fit in `u16`.
    pub fn new(size: Size) -> HalftoneResult<Self> {
        let (width, height) = surface_dims(size)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// A transparent surface of the default 300x150 size.
    pub fn blank() -> Self {
        let (width, height) = (DEFAULT_SURFACE_WIDTH as u16, DEFAULT_SURFACE_HEIGHT as u16);
        Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::blank()
    }
}

impl RenderSurface for CpuSurface {
    fn size(&self) -> Size {
        Size {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn resize(&mut self, size: Size) -> HalftoneResult<()> {
        let (width, height) = surface_dims(size)?;
        if width != self.width || height != self.height {
            *self = Self {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
            };
        }
        Ok(())
    }

    fn clear(&mut self) {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
    }

    fn draw_plan(&mut self, plan: &HalftonePlan) -> HalftoneResult<()> {
        if plan.size != self.size() {
            return Err(HalftoneError::render(format!(
                "plan is {}x{} but surface is {}x{}",
                plan.size.width, plan.size.height, self.width, self.height
            )));
        }

        let c = plan.color.rgba8();
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));

        let max_radius = raster_radius_limit(self.width, self.height);
        for op in plan.ops.iter().filter(|op| op.is_visible()) {
            let op = DotOp {
                center: op.center,
                radius: op.radius.min(max_radius),
            };
            match plan.shape {
                Shape::Circle => {
                    let path = kurbo::Circle::new(op.center, op.radius).to_path(CIRCLE_TOLERANCE);
                    ctx.fill_path(&bezpath_to_cpu(&path));
                }
                Shape::Square => ctx.fill_rect(&rect_to_cpu(op.bounds())),
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn surface_dims(size: Size) -> HalftoneResult<(u16, u16)> {
    let width: u16 = size
        .width
        .try_into()
        .map_err(|_| HalftoneError::render("surface width exceeds u16"))?;
    let height: u16 = size
        .height
        .try_into()
        .map_err(|_| HalftoneError::render("surface height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(HalftoneError::render("surface dimensions must be non-zero"));
    }
    Ok((width, height))
}

// Dot centers lie on the surface, so a radius past the diagonal already covers every pixel.
// Clipping there keeps path flattening bounded for huge dot sizes.
fn raster_radius_limit(width: u16, height: u16) -> f64 {
    f64::from(width).hypot(f64::from(height)) + 1.0
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
