use std::sync::Arc;

use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{HalftoneError, HalftoneResult};

/// Immutable decoded pixel snapshot that every render pass reads from.
///
/// Straight-alpha RGBA8, row-major, tightly packed. Cloning shares the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    size: Size,
    rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap an RGBA8 buffer. Fails when a dimension is zero or the length does not match.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> HalftoneResult<Self> {
        let size = Size::new(width, height)?;
        if rgba8.len() != size.rgba8_len() {
            return Err(HalftoneError::invalid_parameter(format!(
                "source buffer is {} bytes, expected {} for {width}x{height} RGBA8",
                rgba8.len(),
                size.rgba8_len()
            )));
        }
        Ok(Self {
            size,
            rgba8: Arc::new(rgba8),
        })
    }

    /// A `width` x `height` image filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> HalftoneResult<Self> {
        let size = Size::new(width, height)?;
        let px = [color.r, color.g, color.b, color.a];
        let rgba8 = px.repeat(size.pixel_count());
        Self::from_rgba8(width, height, rgba8)
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn as_rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = self.size.rgba8_index(x, y);
        let px = &self.rgba8[i..i + 4];
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }
}
