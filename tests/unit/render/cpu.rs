use super::*;
use crate::assets::color::FillColor;
use crate::foundation::core::Rgba8;
use crate::halftone::plan::DotOp;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn single_dot_plan(shape: Shape, radius: f64) -> HalftonePlan {
    HalftonePlan {
        size: Size::new(20, 20).unwrap(),
        shape,
        color: FillColor(Rgba8::opaque(255, 0, 0)),
        ops: vec![DotOp {
            center: Point::new(10.0, 10.0),
            radius,
        }],
    }
}

#[test]
fn blank_surface_has_default_size_and_is_transparent() {
    let s = CpuSurface::blank();
    assert_eq!(s.size(), Size::new(300, 150).unwrap());
    let f = s.readback();
    assert!(f.premultiplied);
    assert_eq!(f.data.len(), 300 * 150 * 4);
    assert!(f.is_blank());
}

#[test]
fn oversized_surfaces_are_rejected() {
    let big = Size::new(70_000, 10).unwrap();
    assert!(matches!(
        CpuSurface::new(big),
        Err(HalftoneError::Render(_))
    ));

    let mut s = CpuSurface::blank();
    assert!(s.resize(big).is_err());
    assert_eq!(s.size(), Size::new(300, 150).unwrap());
}

#[test]
fn square_fills_its_bounds() {
    let mut s = CpuSurface::new(Size::new(20, 20).unwrap()).unwrap();
    s.draw_plan(&single_dot_plan(Shape::Square, 5.0)).unwrap();
    let f = s.readback();
    assert_eq!(px(&f, 5, 5), [255, 0, 0, 255]);
    assert_eq!(px(&f, 14, 14), [255, 0, 0, 255]);
    assert_eq!(px(&f, 4, 10), [0, 0, 0, 0]);
    assert_eq!(px(&f, 15, 10), [0, 0, 0, 0]);
}

#[test]
fn circle_covers_center_but_not_corners() {
    let mut s = CpuSurface::new(Size::new(20, 20).unwrap()).unwrap();
    s.draw_plan(&single_dot_plan(Shape::Circle, 5.0)).unwrap();
    let f = s.readback();
    assert_eq!(px(&f, 10, 10), [255, 0, 0, 255]);
    // Inside the square bounds, outside the circle.
    assert_eq!(px(&f, 5, 5), [0, 0, 0, 0]);
    assert_eq!(px(&f, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn zero_radius_paints_nothing() {
    for shape in [Shape::Circle, Shape::Square] {
        let mut s = CpuSurface::new(Size::new(20, 20).unwrap()).unwrap();
        s.draw_plan(&single_dot_plan(shape, 0.0)).unwrap();
        assert!(s.readback().is_blank());
    }
}

#[test]
fn clear_erases_previous_paint() {
    let mut s = CpuSurface::new(Size::new(20, 20).unwrap()).unwrap();
    s.draw_plan(&single_dot_plan(Shape::Square, 5.0)).unwrap();
    assert!(!s.readback().is_blank());
    s.clear();
    assert!(s.readback().is_blank());
}

#[test]
fn plan_size_mismatch_is_a_render_error() {
    let mut s = CpuSurface::blank();
    let err = s
        .draw_plan(&single_dot_plan(Shape::Square, 5.0))
        .unwrap_err();
    assert!(matches!(err, HalftoneError::Render(_)));
}

#[test]
fn radius_limit_exceeds_the_diagonal() {
    assert!(raster_radius_limit(3, 4) > 5.0);
    assert!(raster_radius_limit(1, 1) > 2f64.sqrt());
}

#[test]
fn huge_radius_is_clipped_and_covers_the_surface() {
    for shape in [Shape::Circle, Shape::Square] {
        let mut s = CpuSurface::new(Size::new(8, 8).unwrap()).unwrap();
        let plan = HalftonePlan {
            size: Size::new(8, 8).unwrap(),
            shape,
            color: FillColor(Rgba8::opaque(255, 0, 0)),
            ops: vec![DotOp {
                center: Point::new(0.0, 0.0),
                radius: f64::from(i32::MAX) / 2.0,
            }],
        };
        s.draw_plan(&plan).unwrap();
        let f = s.readback();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(px(&f, x, y), [255, 0, 0, 255], "{shape:?} at ({x}, {y})");
            }
        }
    }
}
