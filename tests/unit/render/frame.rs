use super::*;

#[test]
fn over_opaque_source_replaces_destination() {
    assert_eq!(
        over([10, 20, 30, 255], [200, 100, 50, 255], 1.0),
        [200, 100, 50, 255]
    );
}

#[test]
fn over_transparent_source_keeps_destination() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0], 1.0), [10, 20, 30, 255]);
    assert_eq!(
        over([10, 20, 30, 255], [200, 100, 50, 255], 0.0),
        [10, 20, 30, 255]
    );
}

#[test]
fn composite_rejects_mismatched_sizes() {
    let mut a = FrameRGBA::transparent(Canvas::new(2, 2));
    let b = FrameRGBA::transparent(Canvas::new(3, 2));
    assert!(a.composite_over(&b, 1.0).is_err());
}

#[test]
fn composite_and_pixel_access() {
    let mut base = FrameRGBA::transparent(Canvas::new(2, 1));
    assert!(base.is_clear());
    let mut top = FrameRGBA::transparent(Canvas::new(2, 1));
    top.data[4..8].copy_from_slice(&[128, 0, 0, 128]);
    base.composite_over(&top, 1.0).unwrap();
    assert_eq!(base.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(base.pixel(1, 0), Some([128, 0, 0, 128]));
    assert_eq!(base.pixel(2, 0), None);
    assert_eq!(base.covered_pixels(), 1);
    base.clear();
    assert!(base.is_clear());
}

#[test]
fn straight_alpha_conversion_unpremultiplies() {
    let mut f = FrameRGBA::transparent(Canvas::new(1, 1));
    f.data.copy_from_slice(&[64, 32, 0, 128]);
    assert_eq!(f.to_straight_rgba8(), vec![128, 64, 0, 128]);
}
