//! cinescroll is a scroll-synchronized animation engine for full-viewport cinematic panels.
//!
//! Scroll position drives per-panel visual channels through piecewise-linear keyframe curves,
//! while two particle effects (a celebratory burst and an ambient bokeh field) tick on their own
//! frame cadence and rasterize on the CPU.
//!
//! - Describe the page with an [`EngineConfig`]
//! - Create a [`Stage`] for a viewport
//! - Feed it [`Stage::on_scroll`] / [`Stage::on_resize`] and call [`Stage::tick`] per frame
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Engine configuration.
pub mod config;
pub(crate) mod panel;
pub(crate) mod particles;
pub(crate) mod render;
pub(crate) mod scroll;
pub(crate) mod session;

pub use crate::foundation::color::{
    BLUSH, BURST_PALETTE, CREAM, ROSE_GOLD, ROSE_GOLD_DARK, ROSE_GOLD_LIGHT, Tone,
};
pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, Point, Rect, Vec2, Viewport};
pub use crate::foundation::error::{CineError, CineResult};
pub use crate::foundation::rng::{RandomSource, Rng64};

pub use crate::animation::curve::{Breakpoint, ChannelCurve, evaluate};
pub use crate::animation::ease::Ease;
pub use crate::animation::track::LoopTrack;
pub use crate::config::{AmbientConfig, BurstConfig, EngineConfig, PanelSpec, PanelStyle};
pub use crate::panel::controller::{PanelController, PanelCurves, PanelVisualState};
pub use crate::panel::page::{IndicatorState, Page};
pub use crate::particles::ambient::{AmbientField, AmbientParticle, RisingHeart};
pub use crate::particles::arena::{SlotArena, SlotId};
pub use crate::particles::burst::{
    BurstSimulator, BurstState, Particle, ShapeKind, spawn_particle,
};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::shapes::{circle_path, heart_path, sparkle_path};
pub use crate::render::surface::RasterSurface;
pub use crate::scroll::progress::{
    AnchorMode, ElementBounds, ProgressTracker, ScrollWindow, compute_progress,
};
pub use crate::scroll::source::{ScrollSnapshot, ScrollSource};
pub use crate::session::stage::{Stage, StageFrame};
