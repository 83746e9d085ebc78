use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn small_loader() -> LoaderOpts {
    LoaderOpts {
        max_width: 32,
        max_height: 24,
        ..LoaderOpts::default()
    }
}

#[test]
fn render_before_load_is_not_ready_and_leaves_surface_blank() {
    let mut s = HalftoneSession::new(LoaderOpts::default());
    let err = s.render().unwrap_err();
    assert!(err.is_not_ready());
    assert!(s.surface().readback().is_blank());
    assert!(s.last_stats().is_none());
}

#[test]
fn export_before_render_is_not_ready() {
    let s = HalftoneSession::new(LoaderOpts::default());
    assert!(s.export_png().unwrap_err().is_not_ready());
    assert!(s.export_data_url().unwrap_err().is_not_ready());
    assert!(s.frame().unwrap_err().is_not_ready());
}

#[test]
fn params_set_before_load_are_kept() {
    let mut s = HalftoneSession::new(small_loader());
    let p = RenderParameters {
        spacing: 3,
        ..RenderParameters::default()
    };
    assert!(s.set_params(p.clone()).unwrap_err().is_not_ready());
    assert_eq!(s.params(), &p);
}

#[test]
fn invalid_params_are_rejected_and_previous_kept() {
    let mut s = HalftoneSession::new(small_loader());
    s.load_image(&png_bytes(4, 3, [0, 0, 0, 255])).unwrap();
    let before = s.frame().unwrap();

    let err = s
        .set_params(RenderParameters {
            spacing: 0,
            ..RenderParameters::default()
        })
        .unwrap_err();
    assert!(matches!(err, HalftoneError::InvalidParameter(_)));
    assert_eq!(s.params(), &RenderParameters::default());
    assert_eq!(s.frame().unwrap(), before);
}

#[test]
fn load_sizes_surface_and_renders_immediately() {
    let mut s = HalftoneSession::new(small_loader());
    let stats = s.load_image(&png_bytes(4, 3, [0, 0, 0, 255])).unwrap();

    let src = s.source().unwrap();
    assert_eq!((src.width(), src.height()), (32, 24));
    assert_eq!(s.surface().size(), src.size());
    // ceil(32 / 5) * ceil(24 / 5)
    assert_eq!(stats.samples, 7 * 5);
    assert_eq!(stats.painted, 35);
    assert!(!s.frame().unwrap().is_blank());
    assert!(s.export_png().is_ok());
}

#[test]
fn failed_decode_keeps_previous_image() {
    let mut s = HalftoneSession::new(small_loader());
    s.load_image(&png_bytes(4, 3, [0, 0, 0, 255])).unwrap();
    let before = s.source().cloned();

    let err = s.load_image(b"not an image").unwrap_err();
    assert!(matches!(err, HalftoneError::Decode(_)));
    assert_eq!(s.source().cloned(), before);
    assert!(s.render().is_ok());
}

#[test]
fn new_upload_replaces_image_wholesale() {
    let mut s = HalftoneSession::new(small_loader());
    s.load_image(&png_bytes(4, 3, [0, 0, 0, 255])).unwrap();
    s.set_source(SourceImage::solid(6, 10, Rgba8::opaque(255, 255, 255)).unwrap())
        .unwrap();

    assert_eq!(s.surface().size(), s.source().unwrap().size());
    assert_eq!(s.source().unwrap().width(), 6);
    assert!(s.frame().unwrap().is_blank());
}

#[test]
fn repeated_renders_are_pixel_identical() {
    let mut s = HalftoneSession::new(small_loader());
    s.load_image(&png_bytes(5, 5, [90, 0, 0, 255])).unwrap();
    let a = s.frame().unwrap();
    s.render().unwrap();
    let b = s.frame().unwrap();
    assert_eq!(a, b);
}

#[test]
fn with_params_validates_without_rendering() {
    let p = RenderParameters {
        shape: crate::halftone::params::Shape::Square,
        ..RenderParameters::default()
    };
    let s = HalftoneSession::new(small_loader())
        .with_params(p.clone())
        .unwrap();
    assert_eq!(s.params(), &p);
    assert!(s.last_stats().is_none());

    let bad = RenderParameters {
        dot_size: -1,
        ..RenderParameters::default()
    };
    assert!(
        HalftoneSession::new(small_loader())
            .with_params(bad)
            .is_err()
    );
}

#[test]
fn fully_transparent_image_renders_max_size_dots() {
    let mut s = HalftoneSession::new(small_loader());
    let stats = s.load_image(&png_bytes(4, 4, [255, 255, 255, 0])).unwrap();

    assert_eq!(s.source().unwrap().pixel(0, 0), Some(Rgba8::new(0, 0, 0, 0)));
    // 24x24 after fitting, ceil(24 / 5) squared.
    assert_eq!(stats.samples, 25);
    assert_eq!(stats.painted, 25);

    let frame = s.frame().unwrap();
    assert!(!frame.is_blank());
    // Dot at the origin has radius 5: pixel (1, 1) is fully covered in black.
    assert_eq!(&frame.data[(24 + 1) * 4..(24 + 1) * 4 + 4], &[0, 0, 0, 255]);
}
