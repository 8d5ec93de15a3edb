use crate::animation::ease::Ease;
use crate::animation::track::LoopTrack;
use crate::config::AmbientConfig;
use crate::foundation::color::{ROSE_GOLD, ROSE_GOLD_LIGHT, Tone};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Vec2};
use crate::foundation::error::CineResult;
use crate::foundation::rng::RandomSource;
use crate::render::frame::FrameRGBA;
use crate::render::shapes::{circle_path, heart_path};
use crate::render::surface::RasterSurface;

// Drift keyframes for a 20px amplitude, normalized to 1.
const DRIFT_X: [f64; 5] = [0.0, 1.0, -0.5, 0.75, 0.0];
const DRIFT_Y: [f64; 5] = [0.0, -0.75, 0.5, -1.0, 0.0];
const PULSE: [f64; 5] = [1.0, 1.15, 0.95, 1.1, 1.0];

const FLARE_RADIUS: f64 = 300.0;
const FLARE_PERIOD_SECS: f64 = 8.0;
// Peak alpha of the flare's radial falloff.
const FLARE_CORE_ALPHA: f64 = 0.08;

/// Rings used to fake a gaussian edge on soft circles.
const SOFT_RINGS: usize = 6;

/// Soft disc queued for the current frame.
#[derive(Clone, Copy, Debug)]
struct SoftDisc {
    center: Point,
    radius: f64,
    blur: f64,
    tone: Tone,
    alpha: f64,
}

/// One soft bokeh circle.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
    /// Base center as a fraction of the surface size.
    pub anchor: Vec2,
    /// Diameter in pixels.
    pub size: f64,
    /// Alpha before field opacity.
    pub base_opacity: f64,
    /// Fill tone.
    pub color: Tone,
    /// Edge softness in pixels.
    pub blur: f64,
    drift_x: LoopTrack,
    drift_y: LoopTrack,
    pulse: LoopTrack,
}

impl AmbientParticle {
    /// Seconds before the first drift cycle.
    pub fn delay_secs(&self) -> f64 {
        self.drift_x.delay_secs()
    }

    /// Drift cycle length in seconds.
    pub fn period_secs(&self) -> f64 {
        self.drift_x.period_secs()
    }
}

/// One heart rising through the background.
#[derive(Clone, Debug, PartialEq)]
pub struct RisingHeart {
    /// Horizontal position as a fraction of the surface width.
    pub x_fraction: f64,
    /// Outline size in pixels.
    pub size: f64,
    /// Opacity while fully faded in.
    pub peak_opacity: f64,
    rise: LoopTrack,
    fade: LoopTrack,
}

impl RisingHeart {
    /// Center at `elapsed` on a `canvas`-sized surface.
    pub fn position(&self, canvas: Canvas, elapsed_secs: f64) -> Point {
        Point::new(
            self.x_fraction * canvas.w(),
            self.rise.sample(elapsed_secs) * canvas.h(),
        )
    }

    /// Opacity at `elapsed`.
    pub fn opacity(&self, elapsed_secs: f64) -> f64 {
        self.fade.sample(elapsed_secs)
    }
}

/// Decorative background: drifting soft circles, a pulsing lens flare and rising hearts.
///
/// Every particle is a pure function of elapsed time; [`AmbientField::advance`] only moves the
/// clock. The circle layer fades with page scroll progress.
#[derive(Debug)]
pub struct AmbientField {
    config: AmbientConfig,
    canvas: Canvas,
    elapsed_secs: f64,
    page_progress: f64,
    particles: Vec<AmbientParticle>,
    hearts: Vec<RisingHeart>,
    flare_opacity: LoopTrack,
    flare_scale: LoopTrack,
    surface: Option<RasterSurface>,
    discs: Vec<SoftDisc>,
    disc: BezPath,
    heart: BezPath,
}

impl AmbientField {
    /// Build the field, drawing every particle attribute from `rng`.
    pub fn new<R: RandomSource + ?Sized>(
        config: AmbientConfig,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> CineResult<Self> {
        config.validate()?;
        let mut particles = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            particles.push(spawn_ambient(rng)?);
        }
        let mut hearts = Vec::with_capacity(config.rising_hearts);
        for _ in 0..config.rising_hearts {
            hearts.push(spawn_rising_heart(rng)?);
        }

        let particles_len = particles.len();
        let mut field = Self {
            config,
            canvas: Canvas::new(width, height),
            elapsed_secs: 0.0,
            page_progress: 0.0,
            particles,
            hearts,
            flare_opacity: LoopTrack::new(&[0.02, 0.06, 0.02], FLARE_PERIOD_SECS, Ease::InOutQuad)?,
            flare_scale: LoopTrack::new(&[1.0, 1.1, 1.0], FLARE_PERIOD_SECS, Ease::InOutQuad)?,
            surface: None,
            discs: Vec::with_capacity(particles_len + 1),
            disc: circle_path(Point::ORIGIN, 1.0),
            heart: heart_path(1.0),
        };
        field.acquire_surface();
        Ok(field)
    }

    fn acquire_surface(&mut self) {
        self.surface = match RasterSurface::new(self.canvas) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::warn!(
                    width = self.canvas.width,
                    height = self.canvas.height,
                    error = %err,
                    "ambient surface unavailable, rendering disabled"
                );
                None
            }
        };
    }

    /// Number of soft circles. Constant for the field's lifetime.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` when the field has no circles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Soft circles.
    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }

    /// Rising hearts.
    pub fn hearts(&self) -> &[RisingHeart] {
        &self.hearts
    }

    /// Seconds since the field started.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Move the clock forward. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }
    }

    /// Feed page scroll progress (clamped to `[0, 1]`).
    pub fn set_page_progress(&mut self, progress: f64) {
        self.page_progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Opacity of the circle layer for the current page progress.
    pub fn field_opacity(&self) -> f64 {
        self.config.opacity_curve.evaluate(self.page_progress)
    }

    /// Update surface dimensions; particles keep their relative placement.
    pub fn resize(&mut self, width: u32, height: u32) {
        let canvas = Canvas::new(width, height);
        if canvas == self.canvas && self.surface.is_some() {
            return;
        }
        tracing::debug!(width, height, "ambient resize");
        self.canvas = canvas;
        self.acquire_surface();
    }

    /// Center of circle `index` at `elapsed_secs`, in pixels.
    pub fn particle_position(&self, index: usize, elapsed_secs: f64) -> Option<Point> {
        let p = self.particles.get(index)?;
        let amp = self.config.drift_amplitude;
        let base = Point::new(p.anchor.x * self.canvas.w(), p.anchor.y * self.canvas.h());
        Some(
            base + Vec2::new(
                p.drift_x.sample(elapsed_secs) * amp,
                p.drift_y.sample(elapsed_secs) * amp,
            ),
        )
    }

    /// Scale pulse of circle `index` at `elapsed_secs`.
    pub fn particle_scale(&self, index: usize, elapsed_secs: f64) -> Option<f64> {
        self.particles
            .get(index)
            .map(|p| p.pulse.sample(elapsed_secs))
    }

    /// Last rendered frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.surface.as_ref().map(RasterSurface::frame)
    }

    /// Redraw the field at the current clock.
    ///
    /// Returns `None` when no surface is available.
    pub fn render(&mut self) -> Option<&FrameRGBA> {
        if self.surface.is_none() {
            return None;
        }
        let t = self.elapsed_secs;
        let field = self.field_opacity();

        let mut discs = std::mem::take(&mut self.discs);
        discs.clear();
        for (i, p) in self.particles.iter().enumerate() {
            let Some(center) = self.particle_position(i, t) else {
                continue;
            };
            discs.push(SoftDisc {
                center,
                radius: 0.5 * p.size * p.pulse.sample(t),
                blur: p.blur,
                tone: p.color,
                alpha: p.base_opacity * field,
            });
        }
        if self.config.lens_flare {
            let scale = self.flare_scale.sample(t);
            discs.push(SoftDisc {
                center: Point::new(0.5 * self.canvas.w(), self.canvas.h() / 3.0),
                radius: 0.4 * FLARE_RADIUS * scale,
                blur: 0.6 * FLARE_RADIUS * scale,
                tone: ROSE_GOLD,
                alpha: FLARE_CORE_ALPHA * self.flare_opacity.sample(t) * field,
            });
        }

        let canvas = self.canvas;
        let surface = self.surface.as_mut()?;
        surface.begin_frame();
        for d in &discs {
            fill_soft_disc(surface, &self.disc, *d);
        }
        self.discs = discs;
        for h in &self.hearts {
            let pos = h.position(canvas, t);
            let transform = Affine::translate(pos.to_vec2()) * Affine::scale(h.size);
            surface.fill_path(&self.heart, transform, ROSE_GOLD.with_opacity(h.opacity(t)));
        }
        Some(surface.finish_frame())
    }
}

/// Concentric rings whose stacked alpha reaches `alpha` inside `radius - blur / 2`.
fn fill_soft_disc(surface: &mut RasterSurface, disc: &BezPath, d: SoftDisc) {
    let SoftDisc {
        center,
        radius,
        blur,
        tone,
        alpha,
    } = d;
    if !(alpha > 0.0 && radius > 0.0) {
        return;
    }
    let ring_alpha = 1.0 - (1.0 - alpha.min(1.0)).powf(1.0 / SOFT_RINGS as f64);
    let outer = radius + 0.5 * blur;
    let inner = (radius - 0.5 * blur).max(0.25 * radius);
    for k in 0..SOFT_RINGS {
        let t = k as f64 / (SOFT_RINGS - 1) as f64;
        let r = outer + (inner - outer) * t;
        let transform = Affine::translate(center.to_vec2()) * Affine::scale(r);
        surface.fill_path(disc, transform, tone.with_opacity(ring_alpha));
    }
}

fn spawn_ambient<R: RandomSource + ?Sized>(rng: &mut R) -> CineResult<AmbientParticle> {
    let size = rng.range(60.0, 260.0);
    let anchor = Vec2::new(rng.next_f64(), rng.next_f64());
    let delay = rng.range(0.0, 4.0);
    let period = rng.range(6.0, 14.0);
    let blur = rng.range(30.0, 80.0);
    let base_opacity = rng.range(0.03, 0.10);
    let color = if rng.chance(0.5) {
        ROSE_GOLD
    } else {
        ROSE_GOLD_LIGHT
    };
    let track = |values: &[f64]| -> CineResult<LoopTrack> {
        Ok(LoopTrack::new(values, period, Ease::InOutQuad)?.with_delay(delay))
    };
    Ok(AmbientParticle {
        anchor,
        size,
        base_opacity,
        color,
        blur,
        drift_x: track(&DRIFT_X)?,
        drift_y: track(&DRIFT_Y)?,
        pulse: track(&PULSE)?,
    })
}

fn spawn_rising_heart<R: RandomSource + ?Sized>(rng: &mut R) -> CineResult<RisingHeart> {
    let x_fraction = rng.next_f64();
    let delay = rng.range(0.0, 8.0);
    let duration = rng.range(6.0, 14.0);
    let size = rng.range(8.0, 22.0);
    let peak = rng.range(0.03, 0.09);
    Ok(RisingHeart {
        x_fraction,
        size,
        peak_opacity: peak,
        rise: LoopTrack::new(&[1.1, -0.1], duration, Ease::Linear)?.with_delay(delay),
        fade: LoopTrack::new(&[0.0, peak, peak, 0.0], duration, Ease::Linear)?.with_delay(delay),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/particles/ambient.rs"]
mod tests;
