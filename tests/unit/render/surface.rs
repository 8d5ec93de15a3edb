use super::*;
use crate::render::shapes::circle_path;
use kurbo::Shape;

#[test]
fn empty_or_oversized_canvas_is_a_surface_error() {
    assert!(matches!(
        RasterSurface::new(Canvas::new(0, 10)),
        Err(CineError::Surface(_))
    ));
    assert!(matches!(
        RasterSurface::new(Canvas::new(70_000, 10)),
        Err(CineError::Surface(_))
    ));
}

#[test]
fn opaque_fill_covers_interior_pixels() {
    let mut s = RasterSurface::new(Canvas::new(16, 16)).unwrap();
    s.begin_frame();
    let rect = kurbo::Rect::new(0.0, 0.0, 16.0, 16.0).to_path(0.1);
    s.fill_path(&rect, Affine::IDENTITY, [255, 0, 0, 255]);
    assert_eq!(s.pending_fills(), 1);
    let frame = s.finish_frame();
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(s.pending_fills(), 0);
}

#[test]
fn transparent_fills_are_skipped_and_frames_start_clear() {
    let mut s = RasterSurface::new(Canvas::new(16, 16)).unwrap();
    s.begin_frame();
    s.fill_path(
        &circle_path(kurbo::Point::new(8.0, 8.0), 4.0),
        Affine::IDENTITY,
        [255, 255, 255, 255],
    );
    assert!(!s.finish_frame().is_clear());

    s.begin_frame();
    s.fill_path(
        &circle_path(kurbo::Point::new(8.0, 8.0), 4.0),
        Affine::IDENTITY,
        [255, 255, 255, 0],
    );
    assert_eq!(s.pending_fills(), 0);
    assert!(s.finish_frame().is_clear());
}

#[test]
fn transform_moves_geometry() {
    let mut s = RasterSurface::new(Canvas::new(32, 32)).unwrap();
    s.begin_frame();
    let square = kurbo::Rect::new(-2.0, -2.0, 2.0, 2.0).to_path(0.1);
    s.fill_path(&square, Affine::translate((24.0, 24.0)), [0, 0, 255, 255]);
    let frame = s.finish_frame();
    assert_eq!(frame.pixel(24, 24), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 0, 0]));
}

#[test]
fn clear_resets_last_frame() {
    let mut s = RasterSurface::new(Canvas::new(8, 8)).unwrap();
    s.begin_frame();
    let rect = kurbo::Rect::new(0.0, 0.0, 8.0, 8.0).to_path(0.1);
    s.fill_path(&rect, Affine::IDENTITY, [10, 20, 30, 255]);
    s.finish_frame();
    assert!(!s.frame().is_clear());
    s.clear();
    assert!(s.frame().is_clear());
    assert_eq!(s.canvas(), Canvas::new(8, 8));
}
