use std::f64::consts::TAU;

use crate::config::BurstConfig;
use crate::foundation::color::{ROSE_GOLD, Tone};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Vec2};
use crate::foundation::error::CineResult;
use crate::foundation::rng::{RandomSource, Rng64};
use crate::particles::arena::SlotArena;
use crate::render::frame::FrameRGBA;
use crate::render::shapes::{heart_path, sparkle_path};
use crate::render::surface::RasterSurface;

/// Outline drawn for a burst particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Two-lobed heart.
    Heart,
    /// Four-ray sparkle.
    Sparkle,
}

/// One falling burst particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Center in surface pixels.
    pub position: Point,
    /// Displacement per tick.
    pub velocity: Vec2,
    /// Outline size in pixels.
    pub size: f64,
    /// Fill tone.
    pub color: Tone,
    /// Rotation in radians.
    pub rotation: f64,
    /// Rotation added per tick.
    pub rotation_speed: f64,
    /// Peak opacity, scaled by `life` when drawn.
    pub opacity: f64,
    /// Remaining life in `(0, 1]`.
    pub life: f64,
    /// Life removed per tick.
    pub decay_rate: f64,
    /// Outline.
    pub shape: ShapeKind,
    /// Phase of the horizontal wobble.
    pub wobble_phase: f64,
    /// Wobble phase added per tick.
    pub wobble_speed: f64,
}

impl Particle {
    fn step(&mut self, wobble_amplitude: f64, drag: f64) {
        self.wobble_phase += self.wobble_speed;
        self.position.x += self.velocity.x + self.wobble_phase.sin() * wobble_amplitude;
        self.position.y += self.velocity.y;
        self.velocity.y *= drag;
        self.rotation += self.rotation_speed;
        self.life -= self.decay_rate;
    }

    fn is_spent(&self, height: f64, margin: f64) -> bool {
        self.life <= 0.0 || self.position.y > height + margin
    }

    /// Opacity used when drawing.
    pub fn draw_opacity(&self) -> f64 {
        (self.opacity * self.life).clamp(0.0, 1.0)
    }
}

/// Draw a fresh particle above the top edge of `canvas`.
///
/// Every attribute is an independent uniform draw from `rng`.
pub fn spawn_particle<R: RandomSource + ?Sized>(
    rng: &mut R,
    canvas: Canvas,
    palette: &[Tone],
) -> Particle {
    let (w, h) = (canvas.w(), canvas.h());
    let x = rng.range(0.0, w);
    let y = rng.range(-20.0 - 0.5 * h, -20.0);
    let vx = rng.range(-1.0, 1.0);
    let vy = rng.range(1.2, 3.7);
    let size = rng.range(6.0, 16.0);
    let color = if palette.is_empty() {
        ROSE_GOLD
    } else {
        palette[rng.index(palette.len())]
    };
    let rotation = rng.range(0.0, TAU);
    let rotation_speed = rng.range(-0.05, 0.05);
    let opacity = rng.range(0.6, 1.0);
    let decay_rate = rng.range(0.001, 0.004);
    let shape = if rng.chance(0.6) {
        ShapeKind::Heart
    } else {
        ShapeKind::Sparkle
    };
    let wobble_phase = rng.range(0.0, TAU);
    let wobble_speed = rng.range(0.02, 0.05);

    Particle {
        position: Point::new(x, y),
        velocity: Vec2::new(vx, vy),
        size,
        color,
        rotation,
        rotation_speed,
        opacity,
        life: 1.0,
        decay_rate,
        shape,
        wobble_phase,
        wobble_speed,
    }
}

/// Burst lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstState {
    /// No particles, no ticking.
    Idle,
    /// A session is live.
    Running,
}

/// Celebratory particle burst bound to one raster surface.
///
/// Becomes `Running` when its host turns visible and seeds an initial burst; going invisible
/// or [`BurstSimulator::cancel`] discards the session. Re-entering view starts over.
#[derive(Debug)]
pub struct BurstSimulator<R: RandomSource = Rng64> {
    config: BurstConfig,
    canvas: Canvas,
    rng: R,
    state: BurstState,
    visible: bool,
    ticks: u64,
    particles: SlotArena<Particle>,
    surface: Option<RasterSurface>,
    heart: BezPath,
    sparkle: BezPath,
}

impl<R: RandomSource> BurstSimulator<R> {
    /// Idle simulator for a `canvas`-sized surface.
    ///
    /// `config` is validated first. An unusable canvas is not an error: the simulator runs
    /// without drawing until a resize yields a surface.
    pub fn new(config: BurstConfig, canvas: Canvas, rng: R) -> CineResult<Self> {
        config.validate()?;
        let capacity = config.max_active.max(config.initial_burst);
        let mut sim = Self {
            config,
            canvas,
            rng,
            state: BurstState::Idle,
            visible: false,
            ticks: 0,
            particles: SlotArena::with_capacity(capacity),
            surface: None,
            heart: heart_path(1.0),
            sparkle: sparkle_path(1.0),
        };
        sim.acquire_surface();
        Ok(sim)
    }

    fn acquire_surface(&mut self) {
        self.surface = match RasterSurface::new(self.canvas) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::warn!(
                    width = self.canvas.width,
                    height = self.canvas.height,
                    error = %err,
                    "burst surface unavailable, rendering disabled"
                );
                None
            }
        };
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BurstState {
        self.state
    }

    /// `true` while a session is live.
    pub fn is_running(&self) -> bool {
        self.state == BurstState::Running
    }

    /// Live particle count.
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    /// Arena capacity.
    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }

    /// Ticks since the session started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// `true` when frames can be produced.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Live particles.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p)
    }

    /// Feed the host visibility signal; only edges change state.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.start();
        } else {
            self.stop("hidden");
        }
    }

    /// Force `Idle`, releasing every particle.
    ///
    /// The visibility latch is reset too, so the next visible signal starts a new session.
    pub fn cancel(&mut self) {
        self.visible = false;
        self.stop("cancelled");
    }

    fn start(&mut self) {
        self.particles.clear();
        self.ticks = 0;
        for _ in 0..self.config.initial_burst {
            let p = spawn_particle(&mut self.rng, self.canvas, &self.config.palette);
            if self.particles.insert(p).is_err() {
                break;
            }
        }
        self.state = BurstState::Running;
        tracing::debug!(seeded = self.particles.len(), "burst running");
    }

    fn stop(&mut self, reason: &'static str) {
        if self.state == BurstState::Idle {
            return;
        }
        self.state = BurstState::Idle;
        self.particles.clear();
        self.ticks = 0;
        if let Some(s) = self.surface.as_mut() {
            s.clear();
        }
        tracing::debug!(reason, "burst idle");
    }

    /// Update surface dimensions. Particles and the running state are untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        let canvas = Canvas::new(width, height);
        if canvas == self.canvas && self.surface.is_some() {
            return;
        }
        tracing::debug!(width, height, "burst resize");
        self.canvas = canvas;
        self.acquire_surface();
    }

    /// Run one frame: spawn, integrate, retire, redraw.
    ///
    /// Returns `None` while idle or when no surface is available.
    pub fn tick(&mut self) -> Option<&FrameRGBA> {
        if self.state == BurstState::Idle {
            return None;
        }
        self.ticks += 1;
        if self.ticks % self.config.spawn_interval == 0
            && self.particles.len() < self.config.max_active
        {
            let p = spawn_particle(&mut self.rng, self.canvas, &self.config.palette);
            let inserted = self.particles.insert(p);
            debug_assert!(inserted.is_ok(), "arena capacity is at least max_active");
        }
        let retired = self.advance();
        tracing::trace!(
            tick = self.ticks,
            active = self.particles.len(),
            retired,
            "burst tick"
        );
        self.render()
    }

    /// Integrate every particle one step and retire spent ones. Returns the retired count.
    pub fn advance(&mut self) -> usize {
        let amp = self.config.wobble_amplitude;
        let drag = self.config.drag;
        let height = self.canvas.h();
        let margin = self.config.retire_margin;
        self.particles.retain(|p| {
            p.step(amp, drag);
            !p.is_spent(height, margin)
        })
    }

    fn render(&mut self) -> Option<&FrameRGBA> {
        let surface = self.surface.as_mut()?;
        surface.begin_frame();
        for (_, p) in self.particles.iter() {
            let rgba = p.color.with_opacity(p.draw_opacity());
            let path = match p.shape {
                ShapeKind::Heart => &self.heart,
                ShapeKind::Sparkle => &self.sparkle,
            };
            let transform = Affine::translate(p.position.to_vec2())
                * Affine::rotate(p.rotation)
                * Affine::scale(p.size);
            surface.fill_path(path, transform, rgba);
        }
        Some(surface.finish_frame())
    }

    /// Last rendered frame while running.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        match self.state {
            BurstState::Idle => None,
            BurstState::Running => self.surface.as_ref().map(RasterSurface::frame),
        }
    }

    /// Place a particle directly; used to pin exact trajectories.
    #[cfg(test)]
    pub(crate) fn insert(&mut self, particle: Particle) -> bool {
        self.particles.insert(particle).is_ok()
    }

    /// Enter `Running` without seeding.
    #[cfg(test)]
    pub(crate) fn start_empty(&mut self) {
        self.visible = true;
        self.particles.clear();
        self.ticks = 0;
        self.state = BurstState::Running;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/burst.rs"]
mod tests;
