use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{HalftoneError, HalftoneResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::surface::FrameRGBA;

/// File name used for downloads.
pub const EXPORT_FILE_NAME: &str = "halftone_image.png";

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode a frame as PNG bytes (straight alpha).
#[tracing::instrument(skip(frame), fields(w = frame.width, h = frame.height))]
pub fn encode_png(frame: &FrameRGBA) -> HalftoneResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(HalftoneError::encode(format!(
            "frame is {} bytes, expected {expected}",
            frame.data.len()
        )));
    }

    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }

    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| HalftoneError::encode("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| HalftoneError::encode(format!("write png: {e}")))?;

    tracing::debug!(bytes = buf.len(), "encoded png");
    Ok(buf)
}

/// Wrap PNG bytes as a `data:image/png;base64,...` URL.
pub fn png_data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    let mut out = String::with_capacity(DATA_URL_PREFIX.len() + b64.len());
    out.push_str(DATA_URL_PREFIX);
    out.push_str(&b64);
    out
}

/// Write PNG bytes to `path`, creating parent directories.
pub fn write_png(path: impl AsRef<Path>, png: &[u8]) -> HalftoneResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
