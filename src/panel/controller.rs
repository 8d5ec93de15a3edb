use crate::animation::curve::ChannelCurve;
use crate::foundation::core::Viewport;
use crate::scroll::progress::{AnchorMode, ElementBounds, ProgressTracker, ScrollWindow};
use crate::scroll::source::ScrollSnapshot;

/// Channel values a presentation layer applies to one panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelVisualState {
    /// Progress the channels were evaluated at.
    pub progress: f64,
    /// Background image scale factor.
    pub scale: f64,
    /// Grayscale amount in `[0, 1]` (0 = full color).
    pub desaturation: f64,
    /// Content opacity in `[0, 1]`.
    pub content_opacity: f64,
    /// Content vertical offset in layout units (positive = down).
    pub content_offset: f64,
}

/// The four channel curves driving one panel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelCurves {
    /// Background image scale.
    pub scale: ChannelCurve,
    /// Grayscale amount.
    pub desaturation: ChannelCurve,
    /// Content opacity.
    pub content_opacity: ChannelCurve,
    /// Content vertical offset.
    pub content_offset: ChannelCurve,
}

impl PanelCurves {
    /// Built-in cinematic tables for an anchor mode.
    ///
    /// Leading panels start resolved and only exit near the end of their window; trailing panels
    /// enter and finish resolved; interior panels enter, hold through the middle, and exit.
    pub fn for_anchor(anchor: AnchorMode) -> Self {
        match anchor {
            AnchorMode::Leading => Self {
                scale: ChannelCurve::table(&[(0.0, 1.0), (0.8, 1.0), (1.0, 1.05)]),
                desaturation: ChannelCurve::table(&[(0.0, 0.0), (0.5, 0.0), (1.0, 0.6)]),
                content_opacity: ChannelCurve::table(&[(0.0, 1.0), (0.8, 1.0), (1.0, 0.0)]),
                content_offset: ChannelCurve::table(&[(0.0, 0.0), (0.8, 0.0), (1.0, -20.0)]),
            },
            AnchorMode::Trailing => Self {
                scale: ChannelCurve::table(&[(0.0, 1.05), (0.3, 1.0), (1.0, 1.0)]),
                desaturation: ChannelCurve::table(&[(0.0, 0.6), (0.3, 0.0), (1.0, 0.0)]),
                content_opacity: ChannelCurve::table(&[(0.0, 0.0), (0.25, 1.0), (1.0, 1.0)]),
                content_offset: ChannelCurve::table(&[(0.0, 30.0), (0.25, 0.0), (1.0, 0.0)]),
            },
            AnchorMode::Interior => Self {
                scale: ChannelCurve::table(&[(0.0, 1.08), (0.35, 1.0), (0.65, 1.0), (1.0, 1.05)]),
                desaturation: ChannelCurve::table(&[
                    (0.0, 1.0),
                    (0.3, 0.0),
                    (0.7, 0.0),
                    (1.0, 0.6),
                ]),
                content_opacity: ChannelCurve::table(&[
                    (0.0, 0.0),
                    (0.25, 1.0),
                    (0.75, 1.0),
                    (1.0, 0.0),
                ]),
                content_offset: ChannelCurve::table(&[
                    (0.0, 30.0),
                    (0.25, 0.0),
                    (0.75, 0.0),
                    (1.0, -20.0),
                ]),
            },
        }
    }

    /// Plain reveal section: fades and grows in, holds, then fades and shrinks out. No color or
    /// offset animation.
    pub fn reveal() -> Self {
        Self {
            scale: ChannelCurve::table(&[(0.0, 0.92), (0.3, 1.0), (0.7, 1.0), (1.0, 0.92)]),
            desaturation: ChannelCurve::table(&[(0.0, 0.0), (1.0, 0.0)]),
            content_opacity: ChannelCurve::table(&[(0.0, 0.0), (0.3, 1.0), (0.7, 1.0), (1.0, 0.0)]),
            content_offset: ChannelCurve::table(&[(0.0, 0.0), (1.0, 0.0)]),
        }
    }

    /// Evaluate all four channels at `progress`.
    pub fn evaluate(&self, progress: f64) -> PanelVisualState {
        PanelVisualState {
            progress,
            scale: self.scale.evaluate(progress),
            desaturation: self.desaturation.evaluate(progress),
            content_opacity: self.content_opacity.evaluate(progress),
            content_offset: self.content_offset.evaluate(progress),
        }
    }
}

/// Per-panel orchestrator: one progress tracker feeding four channel curves.
#[derive(Clone, Debug)]
pub struct PanelController {
    tracker: ProgressTracker,
    curves: PanelCurves,
    state: PanelVisualState,
}

impl PanelController {
    /// Create a controller from an explicit window and curve set.
    pub fn new(window: ScrollWindow, curves: PanelCurves) -> Self {
        let state = curves.evaluate(0.0);
        Self {
            tracker: ProgressTracker::new(window),
            curves,
            state,
        }
    }

    /// Controller with the default window and cinematic tables for `anchor`.
    pub fn for_anchor(anchor: AnchorMode) -> Self {
        Self::new(
            ScrollWindow::for_anchor(anchor),
            PanelCurves::for_anchor(anchor),
        )
    }

    /// Anchor mode of this panel's window.
    pub fn anchor(&self) -> AnchorMode {
        self.tracker.window().anchor
    }

    /// Curves driving this panel.
    pub fn curves(&self) -> &PanelCurves {
        &self.curves
    }

    /// Recompute channels for a scroll state.
    pub fn update(
        &mut self,
        scroll_offset: f64,
        viewport: Viewport,
        bounds: ElementBounds,
    ) -> PanelVisualState {
        let progress = self.tracker.update(scroll_offset, viewport, bounds);
        self.state = self.curves.evaluate(progress);
        self.state
    }

    /// Recompute channels from a published snapshot. Geometry changes drop cached bounds first.
    pub fn sample(&mut self, snap: &ScrollSnapshot, bounds: ElementBounds) -> PanelVisualState {
        if snap.geometry_changed {
            self.tracker.invalidate();
        }
        self.update(snap.offset, snap.viewport, bounds)
    }

    /// Drop cached bounds (call on resize).
    pub fn invalidate(&mut self) {
        self.tracker.invalidate();
    }

    /// Last emitted visual state.
    pub fn visual_state(&self) -> PanelVisualState {
        self.state
    }

    /// Last computed progress.
    pub fn progress(&self) -> f64 {
        self.state.progress
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/controller.rs"]
mod tests;
