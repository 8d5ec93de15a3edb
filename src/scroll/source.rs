use crate::foundation::core::Viewport;

/// Immutable view of the scroll state at one publish.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSnapshot {
    /// Monotonic publish counter. Bumps on every scroll, resize, or layout change.
    pub version: u64,
    /// Current scroll offset, clamped to `[0, max_offset]`.
    pub offset: f64,
    /// Viewport size.
    pub viewport: Viewport,
    /// Total document height.
    pub document_height: f64,
    /// `true` when this publish changed geometry (resize or layout), not just the offset.
    pub geometry_changed: bool,
}

impl ScrollSnapshot {
    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Page-level scroll progress: offset over total scrollable height, in `[0, 1]`.
    ///
    /// Pages that cannot scroll report 0.
    pub fn page_progress(&self) -> f64 {
        let max = self.max_offset();
        if !(max.is_finite() && max > 0.0) {
            return 0.0;
        }
        (self.offset / max).clamp(0.0, 1.0)
    }
}

/// Explicit publish value for scroll position, owned by the page session.
///
/// Producers call [`publish`](Self::publish) and [`resize`](Self::resize); consumers poll
/// [`snapshot`](Self::snapshot) and compare versions to skip redundant work.
#[derive(Clone, Debug)]
pub struct ScrollSource {
    current: ScrollSnapshot,
}

impl ScrollSource {
    /// Create a source at offset 0.
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            current: ScrollSnapshot {
                version: 0,
                offset: 0.0,
                viewport,
                document_height: sanitize_len(document_height),
                geometry_changed: true,
            },
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> ScrollSnapshot {
        self.current
    }

    /// Publish a new scroll offset. Offsets are clamped into the scrollable range.
    pub fn publish(&mut self, offset: f64) -> ScrollSnapshot {
        let offset = clamp_offset(offset, self.current.max_offset());
        self.current.offset = offset;
        self.current.geometry_changed = false;
        self.bump()
    }

    /// Publish a viewport change. The offset is re-clamped against the new range.
    pub fn resize(&mut self, viewport: Viewport) -> ScrollSnapshot {
        self.current.viewport = viewport;
        self.current.offset = clamp_offset(self.current.offset, self.current.max_offset());
        self.current.geometry_changed = true;
        self.bump()
    }

    /// Publish a document height change (panel layout recomputed).
    pub fn set_document_height(&mut self, document_height: f64) -> ScrollSnapshot {
        self.current.document_height = sanitize_len(document_height);
        self.current.offset = clamp_offset(self.current.offset, self.current.max_offset());
        self.current.geometry_changed = true;
        self.bump()
    }

    fn bump(&mut self) -> ScrollSnapshot {
        self.current.version = self.current.version.wrapping_add(1);
        self.current
    }
}

fn sanitize_len(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_finite() {
        offset.clamp(0.0, max)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/source.rs"]
mod tests;
