use serde::{Deserialize, Serialize};

use crate::animation::curve::ChannelCurve;
use crate::foundation::color::{BURST_PALETTE, Tone};
use crate::foundation::core::Fps;
use crate::foundation::error::{CineError, CineResult};
use crate::panel::controller::PanelCurves;
use crate::scroll::progress::AnchorMode;

/// Upper bound on ambient particles; the field is decorative and drawn every frame.
pub const MAX_AMBIENT_PARTICLES: usize = 256;

/// Top-level engine configuration, usually loaded from JSON.
///
/// Every field has a default, so `{}` is a valid configuration describing the five-panel page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed for every randomized particle attribute.
    pub seed: u64,
    /// Nominal tick rate used to convert ticks to seconds for looping tracks.
    pub fps: Fps,
    /// Fraction of the burst host panel that must be on screen to run the burst.
    pub visibility_threshold: f64,
    /// Panel index hosting the burst effect. Defaults to the last panel.
    pub burst_panel: Option<usize>,
    /// Panels in document order.
    pub panels: Vec<PanelSpec>,
    /// Burst simulator tuning.
    pub burst: BurstConfig,
    /// Ambient field tuning.
    pub ambient: AmbientConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_CAFE,
            fps: Fps::default(),
            visibility_threshold: 0.5,
            burst_panel: None,
            panels: ["hook", "journey", "essence", "affirmation", "finale"]
                .into_iter()
                .map(PanelSpec::cinematic)
                .collect(),
            burst: BurstConfig::default(),
            ambient: AmbientConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse JSON and validate.
    pub fn from_json(text: &str) -> CineResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| CineError::serde(format!("engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> CineResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(CineError::validation(
                "visibility_threshold must be in (0, 1]",
            ));
        }
        if self.panels.is_empty() {
            return Err(CineError::validation("at least one panel is required"));
        }
        if let Some(i) = self.burst_panel {
            if i >= self.panels.len() {
                return Err(CineError::validation(format!(
                    "burst_panel {i} is out of range for {} panels",
                    self.panels.len()
                )));
            }
        }
        for p in &self.panels {
            if p.id.trim().is_empty() {
                return Err(CineError::validation("panel id must not be empty"));
            }
        }
        self.burst.validate()?;
        self.ambient.validate()
    }

    /// Index of the panel hosting the burst.
    pub fn burst_panel_index(&self) -> usize {
        self.burst_panel
            .unwrap_or_else(|| self.panels.len().saturating_sub(1))
    }
}

/// Visual treatment for a panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStyle {
    /// Anchor-mode tables: scale, grayscale, content fade and lift.
    #[default]
    Cinematic,
    /// Plain fade/grow reveal.
    Reveal,
}

/// One panel in document order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelSpec {
    /// Stable identifier (used in CLI output).
    pub id: String,
    /// Anchor override. By default the first panel leads, the last trails.
    #[serde(default)]
    pub anchor: Option<AnchorMode>,
    /// Visual treatment.
    #[serde(default)]
    pub style: PanelStyle,
    /// Full curve override; wins over `style`.
    #[serde(default)]
    pub curves: Option<PanelCurves>,
}

impl PanelSpec {
    /// Cinematic panel with default anchoring.
    pub fn cinematic(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            anchor: None,
            style: PanelStyle::Cinematic,
            curves: None,
        }
    }

    /// Anchor for this panel at `index` of `count`.
    pub fn resolve_anchor(&self, index: usize, count: usize) -> AnchorMode {
        if let Some(a) = self.anchor {
            return a;
        }
        if index == 0 {
            AnchorMode::Leading
        } else if index + 1 == count {
            AnchorMode::Trailing
        } else {
            AnchorMode::Interior
        }
    }

    /// Curves for this panel given its resolved anchor.
    pub fn resolve_curves(&self, anchor: AnchorMode) -> PanelCurves {
        if let Some(c) = &self.curves {
            return c.clone();
        }
        match self.style {
            PanelStyle::Cinematic => PanelCurves::for_anchor(anchor),
            PanelStyle::Reveal => PanelCurves::reveal(),
        }
    }
}

/// Burst simulator tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BurstConfig {
    /// Particles seeded when a Running session starts.
    pub initial_burst: usize,
    /// Spawn one particle every this many ticks.
    pub spawn_interval: u64,
    /// Cap on simultaneously active particles.
    pub max_active: usize,
    /// Particles retire once `y > height + retire_margin`.
    pub retire_margin: f64,
    /// Per-tick multiplier on vertical velocity.
    pub drag: f64,
    /// Horizontal wobble amplitude per tick.
    pub wobble_amplitude: f64,
    /// Tones drawn uniformly per particle.
    pub palette: Vec<Tone>,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            initial_burst: 60,
            spawn_interval: 8,
            max_active: 100,
            retire_margin: 30.0,
            drag: 0.999,
            wobble_amplitude: 0.5,
            palette: BURST_PALETTE.to_vec(),
        }
    }
}

impl BurstConfig {
    /// Check ranges.
    pub fn validate(&self) -> CineResult<()> {
        if self.spawn_interval == 0 {
            return Err(CineError::validation("burst.spawn_interval must be > 0"));
        }
        if self.max_active == 0 {
            return Err(CineError::validation("burst.max_active must be > 0"));
        }
        if self.initial_burst > self.max_active {
            return Err(CineError::validation(
                "burst.initial_burst must not exceed burst.max_active",
            ));
        }
        if !(self.retire_margin.is_finite() && self.retire_margin >= 0.0) {
            return Err(CineError::validation("burst.retire_margin must be >= 0"));
        }
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(CineError::validation("burst.drag must be in (0, 1]"));
        }
        if !(self.wobble_amplitude.is_finite() && self.wobble_amplitude >= 0.0) {
            return Err(CineError::validation(
                "burst.wobble_amplitude must be >= 0",
            ));
        }
        if self.palette.is_empty() {
            return Err(CineError::validation("burst.palette must not be empty"));
        }
        Ok(())
    }
}

/// Ambient field tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmbientConfig {
    /// Number of soft circles.
    pub count: usize,
    /// Field opacity as a function of page scroll progress.
    pub opacity_curve: ChannelCurve,
    /// Drift amplitude in pixels.
    pub drift_amplitude: f64,
    /// Draw the centered lens-flare glow.
    pub lens_flare: bool,
    /// Number of rising background hearts (0 disables the layer).
    pub rising_hearts: usize,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            count: 14,
            opacity_curve: ChannelCurve::table(&[(0.0, 0.15), (0.5, 0.35), (1.0, 0.15)]),
            drift_amplitude: 20.0,
            lens_flare: true,
            rising_hearts: 12,
        }
    }
}

impl AmbientConfig {
    /// Check ranges.
    pub fn validate(&self) -> CineResult<()> {
        if self.count > MAX_AMBIENT_PARTICLES || self.rising_hearts > MAX_AMBIENT_PARTICLES {
            return Err(CineError::validation(format!(
                "ambient layers are limited to {MAX_AMBIENT_PARTICLES} particles"
            )));
        }
        if !(self.drift_amplitude.is_finite() && self.drift_amplitude >= 0.0) {
            return Err(CineError::validation(
                "ambient.drift_amplitude must be >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
