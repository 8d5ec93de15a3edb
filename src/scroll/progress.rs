use crate::foundation::core::Viewport;

/// Where a panel sits in the page, which decides how its scroll window is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// First panel: counting starts at the very top of the page.
    Leading,
    /// Last panel: counting finishes at the very bottom of the page.
    Trailing,
    /// Any other panel: from entering the bottom edge to leaving the top edge.
    Interior,
}

/// Viewport-relative region over which a panel's progress is measured.
///
/// `entry_ratio` is the viewport fraction (0 = top, 1 = bottom) the element's top edge sits on at
/// progress 0. `exit_ratio` is the viewport fraction its bottom edge sits on at progress 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollWindow {
    /// Anchor mode the window was derived from.
    pub anchor: AnchorMode,
    /// Viewport fraction aligned with the element top at progress 0.
    pub entry_ratio: f64,
    /// Viewport fraction aligned with the element bottom at progress 1.
    pub exit_ratio: f64,
}

impl ScrollWindow {
    /// Default window for an anchor mode.
    pub fn for_anchor(anchor: AnchorMode) -> Self {
        let (entry_ratio, exit_ratio) = match anchor {
            AnchorMode::Leading => (0.0, 0.0),
            AnchorMode::Trailing => (1.0, 1.0),
            AnchorMode::Interior => (1.0, 0.0),
        };
        Self {
            anchor,
            entry_ratio,
            exit_ratio,
        }
    }

    /// Scroll offsets `(start, end)` at which progress is 0 and 1 for `bounds`.
    pub fn scroll_range(&self, viewport: Viewport, bounds: ElementBounds) -> (f64, f64) {
        let start = bounds.top - self.entry_ratio * viewport.height;
        let end = bounds.top + bounds.height - self.exit_ratio * viewport.height;
        (start, end)
    }
}

/// Document-space vertical extent of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBounds {
    /// Distance from the document top to the element top.
    pub top: f64,
    /// Element height.
    pub height: f64,
}

impl ElementBounds {
    /// Build bounds.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Fraction of the element currently inside the viewport, in `[0, 1]`.
    pub fn visible_ratio(&self, scroll_offset: f64, viewport: Viewport) -> f64 {
        if viewport.is_degenerate() || !(self.height > 0.0) || !scroll_offset.is_finite() {
            return 0.0;
        }
        let top = self.top - scroll_offset;
        let bottom = top + self.height;
        let overlap = bottom.min(viewport.height) - top.max(0.0);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TrackerInput {
    offset: f64,
    viewport: Viewport,
    bounds: ElementBounds,
}

/// Converts a scroll offset into a clamped progress scalar for one [`ScrollWindow`].
///
/// The last input and result are cached, so repeated calls with identical inputs are free.
/// Degenerate geometry (non-positive viewport height, zero-length window, non-finite values)
/// yields 0 instead of an error.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    window: ScrollWindow,
    cached: Option<(TrackerInput, f64)>,
}

impl ProgressTracker {
    /// Create a tracker for `window`.
    pub fn new(window: ScrollWindow) -> Self {
        Self {
            window,
            cached: None,
        }
    }

    /// Window this tracker measures.
    pub fn window(&self) -> ScrollWindow {
        self.window
    }

    /// Drop cached bounds; the next update recomputes from scratch.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Last computed progress, if any.
    pub fn last(&self) -> Option<f64> {
        self.cached.map(|(_, p)| p)
    }

    /// Compute progress for the given scroll state.
    pub fn update(&mut self, scroll_offset: f64, viewport: Viewport, bounds: ElementBounds) -> f64 {
        let input = TrackerInput {
            offset: scroll_offset,
            viewport,
            bounds,
        };
        if let Some((prev, p)) = self.cached {
            if prev == input {
                return p;
            }
        }
        let p = compute_progress(self.window, scroll_offset, viewport, bounds);
        self.cached = Some((input, p));
        p
    }
}

/// Stateless progress computation behind [`ProgressTracker::update`].
pub fn compute_progress(
    window: ScrollWindow,
    scroll_offset: f64,
    viewport: Viewport,
    bounds: ElementBounds,
) -> f64 {
    if viewport.is_degenerate() {
        return 0.0;
    }
    let (start, end) = window.scroll_range(viewport, bounds);
    let len = end - start;
    if !(len.is_finite() && len > 0.0) || !scroll_offset.is_finite() {
        return 0.0;
    }
    ((scroll_offset - start) / len).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
