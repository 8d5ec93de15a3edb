use crate::foundation::error::{CineError, CineResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Nominal tick rate represented as a rational `num/den`.
///
/// Burst particles advance per tick; the ambient field converts ticks to seconds with this rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> CineResult<Self> {
        if den == 0 {
            return Err(CineError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CineError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Raster surface dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width as `f64`, for simulation bounds.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`, for simulation bounds.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }
}

/// Scroll container viewport size in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `true` when the viewport cannot host a scroll window (zero, negative, or NaN height).
    pub fn is_degenerate(self) -> bool {
        !(self.height.is_finite() && self.height > 0.0)
    }

    /// Canvas matching this viewport, rounded to whole pixels.
    pub fn to_canvas(self) -> Canvas {
        fn px(v: f64) -> u32 {
            if v.is_finite() {
                v.round().clamp(0.0, f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Canvas::new(px(self.width), px(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
