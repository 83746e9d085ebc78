//! Grid sampling and the brightness-to-size mapping.
//!
//! A [`HalftonePlan`] is the backend-agnostic list of shapes for one render pass. It is rebuilt
//! from the immutable [`SourceImage`] on every pass; nothing is carried over between passes.

use crate::assets::color::FillColor;
use crate::assets::source::SourceImage;
use crate::foundation::core::{Point, Rect, Size};
use crate::halftone::params::{BrightnessChannel, GridSettings, Shape};

/// One grid sample: its coordinate and the brightness proxy read there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    pub x: u32,
    pub y: u32,
    pub brightness: u8,
}

/// Row-major walk over the sample grid (top-to-bottom, left-to-right).
///
/// The last partial cell on each axis is still sampled; the walk stops once a coordinate meets
/// or exceeds the image extent.
pub struct SampleGrid<'a> {
    source: &'a SourceImage,
    channel: BrightnessChannel,
    spacing: u32,
    x: u32,
    y: u32,
}

impl<'a> SampleGrid<'a> {
    pub fn new(source: &'a SourceImage, settings: &GridSettings) -> Self {
        Self {
            source,
            channel: settings.channel,
            spacing: settings.spacing,
            x: 0,
            y: 0,
        }
    }
}

impl Iterator for SampleGrid<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let size = self.source.size();
        if self.y >= size.height {
            return None;
        }

        let (x, y) = (self.x, self.y);
        let brightness = self.channel.read(self.source.pixel(x, y)?);

        // Saturating steps keep the walk finite near u32::MAX.
        self.x = self.x.saturating_add(self.spacing);
        if self.x >= size.width {
            self.x = 0;
            self.y = match self.y.checked_add(self.spacing) {
                Some(next) => next,
                None => size.height,
            };
        }

        Some(Sample { x, y, brightness })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = remaining_samples(self.source.size(), self.spacing, self.x, self.y);
        (n, Some(n))
    }
}

impl ExactSizeIterator for SampleGrid<'_> {}

fn remaining_samples(size: Size, spacing: u32, x: u32, y: u32) -> usize {
    if y >= size.height {
        return 0;
    }
    let per_row = size.width.div_ceil(spacing) as usize;
    let rows_left = (size.height - y).div_ceil(spacing) as usize;
    let done_in_row = (x / spacing) as usize;
    (rows_left * per_row).saturating_sub(done_in_row)
}

/// Number of samples a grid walk visits: `ceil(w / s) * ceil(h / s)`.
pub fn sample_count(size: Size, spacing: u32) -> u64 {
    let s = spacing.max(1);
    u64::from(size.width.div_ceil(s)) * u64::from(size.height.div_ceil(s))
}

/// Inverse brightness mapping: `(255 - b) / 255 * (dot_size_max / 2)`.
///
/// `b = 0` yields `dot_size_max / 2`, `b = 255` yields `0`. Not rounded.
pub fn dot_radius(brightness: u8, dot_size_max: u32) -> f64 {
    f64::from(255 - brightness) / 255.0 * (f64::from(dot_size_max) / 2.0)
}

/// A single shape centered on a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotOp {
    pub center: Point,
    /// Circle radius, or half the square side.
    pub radius: f64,
}

impl DotOp {
    /// Zero-sized shapes paint nothing.
    pub fn is_visible(&self) -> bool {
        self.radius > 0.0
    }

    /// Axis-aligned bounds; for squares this is the shape itself.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }
}

/// Backend-agnostic shapes for one render pass, in grid order.
#[derive(Clone, Debug, PartialEq)]
pub struct HalftonePlan {
    pub size: Size,
    pub shape: Shape,
    pub color: FillColor,
    pub ops: Vec<DotOp>,
}

impl HalftonePlan {
    pub fn sample_count(&self) -> u64 {
        self.ops.len() as u64
    }

    pub fn visible_count(&self) -> u64 {
        self.ops.iter().filter(|op| op.is_visible()).count() as u64
    }
}

/// Walk the grid over `source` and emit one [`DotOp`] per sample.
pub fn compile_plan(source: &SourceImage, settings: &GridSettings) -> HalftonePlan {
    let ops = SampleGrid::new(source, settings)
        .map(|s| DotOp {
            center: Point::new(f64::from(s.x), f64::from(s.y)),
            radius: dot_radius(s.brightness, settings.dot_size_max),
        })
        .collect();

    HalftonePlan {
        size: source.size(),
        shape: settings.shape,
        color: settings.color,
        ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/halftone/plan.rs"]
mod tests;
