use crate::animation::curve::ChannelCurve;
use crate::config::PanelSpec;
use crate::foundation::core::Viewport;
use crate::foundation::error::{CineError, CineResult};
use crate::panel::controller::{PanelController, PanelVisualState};
use crate::scroll::progress::{AnchorMode, ElementBounds, ScrollWindow};
use crate::scroll::source::ScrollSnapshot;

/// Page-level scroll indicator values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IndicatorState {
    /// Fill fraction of the progress track, equal to page progress.
    pub fill: f64,
    /// Opacity of the indicator dot.
    pub glow_opacity: f64,
}

#[derive(Clone, Debug)]
struct PagePanel {
    id: String,
    controller: PanelController,
    bounds: ElementBounds,
}

/// Stack of full-viewport panels laid out top to bottom.
///
/// Each panel is exactly one viewport tall, so a layout pass is needed whenever the viewport
/// changes. The page owns one [`PanelController`] per panel.
#[derive(Clone, Debug)]
pub struct Page {
    panels: Vec<PagePanel>,
    states: Vec<PanelVisualState>,
    viewport: Viewport,
    glow_curve: ChannelCurve,
}

impl Page {
    /// Build panels from specs and lay them out for `viewport`.
    pub fn new(specs: &[PanelSpec], viewport: Viewport) -> CineResult<Self> {
        if specs.is_empty() {
            return Err(CineError::validation("page needs at least one panel"));
        }
        let n = specs.len();
        let panels: Vec<PagePanel> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let anchor = spec.resolve_anchor(i, n);
                let curves = spec.resolve_curves(anchor);
                PagePanel {
                    id: spec.id.clone(),
                    controller: PanelController::new(ScrollWindow::for_anchor(anchor), curves),
                    bounds: ElementBounds::default(),
                }
            })
            .collect();
        let states = panels
            .iter()
            .map(|p| p.controller.visual_state())
            .collect();
        let mut page = Self {
            panels,
            states,
            viewport,
            glow_curve: ChannelCurve::table(&[(0.0, 0.3), (0.5, 0.7), (1.0, 1.0)]),
        };
        page.layout(viewport);
        Ok(page)
    }

    /// Recompute panel bounds for a new viewport and drop cached tracker state.
    pub fn layout(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let h = if viewport.is_degenerate() {
            0.0
        } else {
            viewport.height
        };
        for (i, p) in self.panels.iter_mut().enumerate() {
            p.bounds = ElementBounds::new(i as f64 * h, h);
            p.controller.invalidate();
        }
    }

    /// Total document height for the current layout.
    pub fn document_height(&self) -> f64 {
        self.panels
            .last()
            .map(|p| p.bounds.top + p.bounds.height)
            .unwrap_or(0.0)
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// `true` when the page has no panels (never the case for a constructed page).
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel id at `index`.
    pub fn id(&self, index: usize) -> Option<&str> {
        self.panels.get(index).map(|p| p.id.as_str())
    }

    /// Anchor mode of panel `index`.
    pub fn anchor(&self, index: usize) -> Option<AnchorMode> {
        self.panels.get(index).map(|p| p.controller.anchor())
    }

    /// Document-space bounds of panel `index`.
    pub fn bounds(&self, index: usize) -> Option<ElementBounds> {
        self.panels.get(index).map(|p| p.bounds)
    }

    /// Recompute every panel's channels from a snapshot.
    pub fn update(&mut self, snap: &ScrollSnapshot) -> &[PanelVisualState] {
        if snap.geometry_changed && snap.viewport != self.viewport {
            self.layout(snap.viewport);
        }
        for (p, out) in self.panels.iter_mut().zip(self.states.iter_mut()) {
            *out = p.controller.sample(snap, p.bounds);
        }
        &self.states
    }

    /// States from the last update.
    pub fn states(&self) -> &[PanelVisualState] {
        &self.states
    }

    /// Fraction of panel `index` inside the viewport.
    pub fn visible_ratio(&self, index: usize, snap: &ScrollSnapshot) -> f64 {
        self.panels
            .get(index)
            .map(|p| p.bounds.visible_ratio(snap.offset, snap.viewport))
            .unwrap_or(0.0)
    }

    /// Scroll indicator values for a snapshot.
    pub fn indicator(&self, snap: &ScrollSnapshot) -> IndicatorState {
        let fill = snap.page_progress();
        IndicatorState {
            fill,
            glow_opacity: self.glow_curve.evaluate(fill),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/page.rs"]
mod tests;
