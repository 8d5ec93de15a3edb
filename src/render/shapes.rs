//! Particle outlines in local coordinates, centered on the origin.
//!
//! Callers position, rotate and scale them with an [`Affine`](crate::foundation::core::Affine).

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point};

/// Angular half-width of each sparkle ray, in radians.
const SPARKLE_SPREAD: f64 = 0.15;

/// Heart outline for a particle of `size` pixels.
///
/// The notch sits above the origin and the tip below it.
pub fn heart_path(size: f64) -> BezPath {
    let s = size / 2.0;
    let mut p = BezPath::new();
    p.move_to((0.0, 0.4 * s));
    p.curve_to((-s, -0.3 * s), (-0.6 * s, -s), (0.0, -0.4 * s));
    p.curve_to((0.6 * s, -s), (s, -0.3 * s), (0.0, 0.4 * s));
    p.close_path();
    p
}

/// Four-ray sparkle for a particle of `size` pixels.
///
/// Each ray is a thin triangle from the origin out to twice the inner radius.
pub fn sparkle_path(size: f64) -> BezPath {
    let s = size / 3.0;
    let mut p = BezPath::new();
    for i in 0..4 {
        let a = f64::from(i) * std::f64::consts::FRAC_PI_2;
        p.move_to(Point::ORIGIN);
        p.line_to(polar(a - SPARKLE_SPREAD, s));
        p.line_to(polar(a, 2.0 * s));
        p.line_to(polar(a + SPARKLE_SPREAD, s));
        p.close_path();
    }
    p
}

/// Circle of `radius` centered on `center`.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius.max(0.0)).to_path(0.1)
}

fn polar(angle: f64, r: f64) -> Point {
    Point::new(angle.cos() * r, angle.sin() * r)
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
