use crate::foundation::core::{Affine, BezPath, Canvas};
use crate::foundation::error::{CineError, CineResult};
use crate::render::frame::FrameRGBA;

/// CPU raster target backed by a `vello_cpu` render context and pixmap.
///
/// A frame is built with [`RasterSurface::begin_frame`], any number of fills, then
/// [`RasterSurface::finish_frame`], which rasterizes into the pixmap and copies the pixels out
/// as a premultiplied [`FrameRGBA`]. Each frame starts from a fully transparent surface.
pub struct RasterSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    frame: FrameRGBA,
    fills: usize,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("canvas", &self.canvas)
            .field("fills", &self.fills)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// Acquire a surface for `canvas`.
    ///
    /// Fails with [`CineError::Surface`] for empty canvases or dimensions beyond `u16`.
    pub fn new(canvas: Canvas) -> CineResult<Self> {
        if canvas.is_empty() {
            return Err(CineError::surface(format!(
                "cannot acquire a {}x{} surface",
                canvas.width, canvas.height
            )));
        }
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CineError::surface("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CineError::surface("surface height exceeds u16"))?;

        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            frame: FrameRGBA::transparent(canvas),
            fills: 0,
        })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Start a new frame, discarding any pending fills.
    pub fn begin_frame(&mut self) {
        self.ctx.reset();
        self.fills = 0;
    }

    /// Queue a fill of `path` under `transform` with a straight-alpha RGBA color.
    ///
    /// Fully transparent colors are skipped.
    pub fn fill_path(&mut self, path: &BezPath, transform: Affine, rgba: [u8; 4]) {
        if rgba[3] == 0 {
            return;
        }
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.fills += 1;
    }

    /// Number of fills queued since the last [`RasterSurface::begin_frame`].
    pub fn pending_fills(&self) -> usize {
        self.fills
    }

    /// Rasterize pending fills and return the finished frame.
    pub fn finish_frame(&mut self) -> &FrameRGBA {
        clear_pixmap(&mut self.pixmap);
        if self.fills > 0 {
            self.ctx.flush();
            self.ctx.render_to_pixmap(&mut self.pixmap);
        }
        self.frame
            .data
            .copy_from_slice(self.pixmap.data_as_u8_slice());
        self.ctx.reset();
        self.fills = 0;
        &self.frame
    }

    /// Clear the surface and the last frame to transparent.
    pub fn clear(&mut self) {
        self.ctx.reset();
        self.fills = 0;
        clear_pixmap(&mut self.pixmap);
        self.frame.clear();
    }

    /// The last finished frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
