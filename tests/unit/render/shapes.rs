use super::*;
use kurbo::PathEl;

#[test]
fn heart_has_two_lobes_and_closes() {
    let p = heart_path(10.0);
    let els = p.elements();
    assert_eq!(els.len(), 4);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 2.0)));
    assert!(matches!(els[1], PathEl::CurveTo(..)));
    assert!(matches!(els[2], PathEl::CurveTo(_, _, end) if end == Point::new(0.0, 2.0)));
    assert_eq!(els[3], PathEl::ClosePath);
}

#[test]
fn heart_scales_with_size() {
    let small = heart_path(10.0).bounding_box();
    let large = heart_path(20.0).bounding_box();
    assert!((large.width() - 2.0 * small.width()).abs() < 1e-9);
    assert!(small.width() <= 10.0 + 1e-9);
}

#[test]
fn sparkle_has_four_rays_reaching_twice_inner_radius() {
    let p = sparkle_path(9.0);
    let moves = p
        .elements()
        .iter()
        .filter(|e| matches!(e, PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 4);
    let bb = p.bounding_box();
    assert!((bb.x1 - 6.0).abs() < 1e-9);
    assert!((bb.y1 - 6.0).abs() < 1e-9);
    assert!((bb.x0 + 6.0).abs() < 1e-9);
}

#[test]
fn circle_path_bounds_match_radius() {
    let bb = circle_path(Point::new(5.0, 5.0), 3.0).bounding_box();
    assert!((bb.x0 - 2.0).abs() < 1e-6);
    assert!((bb.x1 - 8.0).abs() < 1e-6);
    assert!(circle_path(Point::ORIGIN, -1.0).bounding_box().width() < 1e-9);
}
