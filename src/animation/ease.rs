/// Easing applied across one segment of a [`LoopTrack`](crate::LoopTrack).
///
/// Channel curves are always linear; easing is only used by the looping decorative tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity mapping.
    #[default]
    Linear,
    /// Quadratic ease-in-out.
    InOutQuad,
}

impl Ease {
    /// Map segment-local `t` (clamped to `[0, 1]`) through the easing function.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
