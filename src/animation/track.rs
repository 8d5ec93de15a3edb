use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::foundation::error::{CineError, CineResult};

/// Evenly spaced keyframe values replayed forever over a fixed period.
///
/// Each segment between neighbouring values is eased with [`Ease`]. The track is a pure function
/// of elapsed time; nothing is mutated while sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopTrack {
    values: SmallVec<[f64; 5]>,
    period_secs: f64,
    delay_secs: f64,
    ease: Ease,
}

impl LoopTrack {
    /// Build a track. Needs at least two values and a positive, finite period.
    pub fn new(values: &[f64], period_secs: f64, ease: Ease) -> CineResult<Self> {
        if values.len() < 2 {
            return Err(CineError::validation("loop track needs at least two values"));
        }
        if !(period_secs.is_finite() && period_secs > 0.0) {
            return Err(CineError::validation("loop track period must be > 0"));
        }
        Ok(Self {
            values: values.iter().copied().collect(),
            period_secs,
            delay_secs: 0.0,
            ease,
        })
    }

    /// Hold the first value for `delay_secs` before the first cycle starts.
    pub fn with_delay(mut self, delay_secs: f64) -> Self {
        self.delay_secs = if delay_secs.is_finite() {
            delay_secs.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Cycle length in seconds.
    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }

    /// Hold time before the first cycle.
    pub fn delay_secs(&self) -> f64 {
        self.delay_secs
    }

    /// Normalized phase in `[0, 1)` at `elapsed_secs`; `None` while still delayed.
    pub fn phase(&self, elapsed_secs: f64) -> Option<f64> {
        let local = elapsed_secs - self.delay_secs;
        if !local.is_finite() || local < 0.0 {
            return None;
        }
        Some((local / self.period_secs).fract())
    }

    /// Sample the track at `elapsed_secs`.
    pub fn sample(&self, elapsed_secs: f64) -> f64 {
        match self.phase(elapsed_secs) {
            Some(phase) => self.sample_phase(phase),
            None => self.values[0],
        }
    }

    /// Sample the track at a normalized phase (wrapped into `[0, 1)`).
    pub fn sample_phase(&self, phase: f64) -> f64 {
        let phase = if phase.is_finite() {
            phase.rem_euclid(1.0)
        } else {
            0.0
        };
        let segments = self.values.len() - 1;
        let pos = phase * segments as f64;
        let i = (pos.floor() as usize).min(segments - 1);
        let t = self.ease.apply(pos - i as f64);
        let a = self.values[i];
        let b = self.values[i + 1];
        a + (b - a) * t
    }

    /// Smallest and largest keyframe values. Eased segments never overshoot these.
    pub fn bounds(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
