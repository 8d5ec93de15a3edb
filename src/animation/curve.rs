use smallvec::SmallVec;

use crate::foundation::error::{CineError, CineResult};

/// One `(progress, value)` breakpoint of a [`ChannelCurve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    /// Progress position in `[0, 1]`.
    pub at: f64,
    /// Channel value at `at`.
    pub value: f64,
}

impl Breakpoint {
    /// Build a breakpoint.
    pub const fn new(at: f64, value: f64) -> Self {
        Self { at, value }
    }
}

/// Piecewise-linear mapping from progress to a channel value.
///
/// Invariants (checked by [`ChannelCurve::new`]):
/// - at least two breakpoints;
/// - first position is `0`, last position is `1`;
/// - positions are non-decreasing (equal neighbours form a step);
/// - every position and value is finite.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct ChannelCurve {
    points: SmallVec<[Breakpoint; 4]>,
}

impl ChannelCurve {
    /// Validate and build a curve.
    pub fn new(points: impl IntoIterator<Item = Breakpoint>) -> CineResult<Self> {
        let points: SmallVec<[Breakpoint; 4]> = points.into_iter().collect();
        if points.len() < 2 {
            return Err(CineError::curve("curve needs at least two breakpoints"));
        }
        if points
            .iter()
            .any(|b| !b.at.is_finite() || !b.value.is_finite())
        {
            return Err(CineError::curve("curve breakpoints must be finite"));
        }
        if points[0].at != 0.0 {
            return Err(CineError::curve("first breakpoint must sit at progress 0"));
        }
        if points[points.len() - 1].at != 1.0 {
            return Err(CineError::curve("last breakpoint must sit at progress 1"));
        }
        if !points.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(CineError::curve(
                "breakpoint positions must be non-decreasing",
            ));
        }
        Ok(Self { points })
    }

    /// Validate and build a curve from `(progress, value)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> CineResult<Self> {
        Self::new(pairs.iter().map(|&(at, value)| Breakpoint::new(at, value)))
    }

    /// Build an unvalidated curve from a built-in table.
    pub(crate) fn table(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs
                .iter()
                .map(|&(at, value)| Breakpoint::new(at, value))
                .collect(),
        }
    }

    /// Breakpoints in ascending position order.
    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Value at progress 0.
    pub fn first_value(&self) -> f64 {
        self.points[0].value
    }

    /// Value at progress 1.
    pub fn last_value(&self) -> f64 {
        self.points[self.points.len() - 1].value
    }

    /// Evaluate the curve at `progress`.
    ///
    /// `progress` is clamped to `[0, 1]` (NaN maps to 0). A zero-width segment yields its right
    /// value.
    pub fn evaluate(&self, progress: f64) -> f64 {
        let x = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let idx = self.points.partition_point(|b| b.at <= x);
        if idx == 0 {
            return self.points[0].value;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].value;
        }

        let a = self.points[idx - 1];
        let b = self.points[idx];
        let denom = b.at - a.at;
        if denom <= 0.0 {
            return b.value;
        }
        let t = (x - a.at) / denom;
        a.value + (b.value - a.value) * t
    }

    /// Evaluate segment `i` (between breakpoints `i` and `i + 1`) at `progress` without
    /// clamping to the segment, i.e. the segment's line extended.
    pub fn segment_value(&self, i: usize, progress: f64) -> Option<f64> {
        let a = *self.points.get(i)?;
        let b = *self.points.get(i + 1)?;
        let denom = b.at - a.at;
        if denom <= 0.0 {
            return Some(b.value);
        }
        Some(a.value + (progress - a.at) / denom * (b.value - a.value))
    }

    /// Sub-ranges of progress where the curve holds `value` exactly (within `eps`).
    pub fn plateaus(&self, value: f64, eps: f64) -> Vec<(f64, f64)> {
        self.points
            .windows(2)
            .filter(|w| {
                w[1].at > w[0].at
                    && (w[0].value - value).abs() <= eps
                    && (w[1].value - value).abs() <= eps
            })
            .map(|w| (w[0].at, w[1].at))
            .collect()
    }
}

impl TryFrom<Vec<Breakpoint>> for ChannelCurve {
    type Error = CineError;

    fn try_from(points: Vec<Breakpoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ChannelCurve> for Vec<Breakpoint> {
    fn from(curve: ChannelCurve) -> Self {
        curve.points.into_vec()
    }
}

/// Evaluate `curve` at `progress`. See [`ChannelCurve::evaluate`].
pub fn evaluate(curve: &ChannelCurve, progress: f64) -> f64 {
    curve.evaluate(progress)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
