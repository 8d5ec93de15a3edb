use crate::config::EngineConfig;
use crate::foundation::core::{Fps, Viewport};
use crate::foundation::error::CineResult;
use crate::foundation::rng::Rng64;
use crate::panel::controller::PanelVisualState;
use crate::panel::page::{IndicatorState, Page};
use crate::particles::ambient::AmbientField;
use crate::particles::burst::{BurstSimulator, BurstState};
use crate::render::frame::FrameRGBA;
use crate::scroll::source::{ScrollSnapshot, ScrollSource};

const BURST_STREAM: u64 = 1;
const AMBIENT_STREAM: u64 = 2;

/// Everything produced by one [`Stage::tick`].
#[derive(Debug)]
pub struct StageFrame<'a> {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Scroll state the panels were sampled at.
    pub snapshot: ScrollSnapshot,
    /// Per-panel channel values in document order.
    pub panels: &'a [PanelVisualState],
    /// Page progress indicator.
    pub indicator: IndicatorState,
    /// Burst lifecycle after this tick.
    pub burst_state: BurstState,
    /// Live burst particles after this tick.
    pub burst_particles: usize,
    /// Burst layer, if running with a surface.
    pub burst: Option<&'a FrameRGBA>,
    /// Ambient layer, if a surface is available.
    pub ambient: Option<&'a FrameRGBA>,
}

impl StageFrame<'_> {
    /// Flatten the ambient and burst layers (burst on top).
    ///
    /// Returns `None` when neither layer produced pixels.
    pub fn composite(&self) -> CineResult<Option<FrameRGBA>> {
        let mut out = match (self.ambient, self.burst) {
            (Some(base), _) => base.clone(),
            (None, Some(top)) => return Ok(Some(top.clone())),
            (None, None) => return Ok(None),
        };
        if let Some(top) = self.burst {
            out.composite_over(top, 1.0)?;
        }
        Ok(Some(out))
    }
}

/// Single-threaded page session.
///
/// Owns the scroll source, the panel page and both particle effects. Scroll and resize
/// notifications update panels synchronously; [`Stage::tick`] advances the effects by one frame.
/// The burst runs while its host panel is at least `visibility_threshold` on screen.
#[derive(Debug)]
pub struct Stage {
    source: ScrollSource,
    page: Page,
    burst: BurstSimulator,
    ambient: AmbientField,
    burst_panel: usize,
    visibility_threshold: f64,
    fps: Fps,
    ticks: u64,
}

impl Stage {
    /// Build a session for `viewport` at scroll offset 0.
    #[tracing::instrument(skip(config))]
    pub fn new(config: &EngineConfig, viewport: Viewport) -> CineResult<Self> {
        config.validate()?;
        let page = Page::new(&config.panels, viewport)?;
        let source = ScrollSource::new(viewport, page.document_height());
        let canvas = viewport.to_canvas();

        let mut rng = Rng64::new(config.seed);
        let burst = BurstSimulator::new(config.burst.clone(), canvas, rng.fork(BURST_STREAM))?;
        let ambient = AmbientField::new(
            config.ambient.clone(),
            canvas.width,
            canvas.height,
            &mut rng.fork(AMBIENT_STREAM),
        )?;

        let mut stage = Self {
            source,
            page,
            burst,
            ambient,
            burst_panel: config.burst_panel_index(),
            visibility_threshold: config.visibility_threshold,
            fps: config.fps,
            ticks: 0,
        };
        let snap = stage.source.snapshot();
        stage.apply(&snap);
        tracing::debug!(
            panels = stage.page.len(),
            document_height = stage.page.document_height(),
            "stage ready"
        );
        Ok(stage)
    }

    /// Publish a scroll offset and return the updated panel states.
    pub fn on_scroll(&mut self, offset: f64) -> &[PanelVisualState] {
        let snap = self.source.publish(offset);
        self.apply(&snap);
        self.page.states()
    }

    /// Relayout for a new viewport. A running burst keeps its particles.
    ///
    /// Page progress is kept across the relayout, so the same part of the page stays on screen.
    pub fn on_resize(&mut self, viewport: Viewport) -> &[PanelVisualState] {
        let progress = self.source.snapshot().page_progress();
        self.page.layout(viewport);
        self.source.set_document_height(self.page.document_height());
        let resized = self.source.resize(viewport);
        let snap = self.source.publish(progress * resized.max_offset());
        let canvas = viewport.to_canvas();
        tracing::debug!(width = canvas.width, height = canvas.height, "stage resize");
        self.burst.resize(canvas.width, canvas.height);
        self.ambient.resize(canvas.width, canvas.height);
        self.apply(&snap);
        self.page.states()
    }

    fn apply(&mut self, snap: &ScrollSnapshot) {
        self.page.update(snap);
        let ratio = self.page.visible_ratio(self.burst_panel, snap);
        self.burst.set_visible(ratio >= self.visibility_threshold);
        self.ambient.set_page_progress(snap.page_progress());
    }

    /// Advance both effects by one frame.
    pub fn tick(&mut self) -> StageFrame<'_> {
        self.ticks += 1;
        self.ambient.advance(self.fps.frame_duration_secs());
        let snapshot = self.source.snapshot();
        let indicator = self.page.indicator(&snapshot);

        self.burst.tick();
        self.ambient.render();
        StageFrame {
            tick: self.ticks,
            snapshot,
            panels: self.page.states(),
            indicator,
            burst_state: self.burst.state(),
            burst_particles: self.burst.active_count(),
            burst: self.burst.frame(),
            ambient: self.ambient.frame(),
        }
    }

    /// Latest scroll state.
    pub fn snapshot(&self) -> ScrollSnapshot {
        self.source.snapshot()
    }

    /// The panel page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The burst simulator.
    pub fn burst(&self) -> &BurstSimulator {
        &self.burst
    }

    /// Mutable burst simulator, e.g. to cancel a running session.
    pub fn burst_mut(&mut self) -> &mut BurstSimulator {
        &mut self.burst
    }

    /// The ambient field.
    pub fn ambient(&self) -> &AmbientField {
        &self.ambient
    }

    /// Ticks since the session started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/stage.rs"]
mod tests;
