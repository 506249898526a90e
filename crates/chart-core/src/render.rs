// File: crates/chart-core/src/render.rs
// Summary: Line draw commands and the collaborator traits a chart renders through.

use crate::color::Rgba;
use crate::geometry::{Range, Size, Viewport};
use crate::scale::Window;

/// One open polyline draw command.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Stroke width in pixels.
    pub thickness: f64,
    pub color: Rgba,
    /// Points in `range` units.
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
    pub viewport: Viewport,
    pub range: Range,
}

impl Line {
    /// Segment in pixel units spanning the whole `viewport`.
    pub fn segment(thickness: f64, color: Rgba, from: (f64, f64), to: (f64, f64), viewport: Viewport) -> Self {
        Self {
            thickness,
            color,
            points: vec![from, to],
            closed: false,
            range: Range::pixels(&viewport),
            viewport,
        }
    }

    /// Map one point into canvas pixels.
    pub fn project(&self, point: (f64, f64)) -> (f64, f64) {
        self.range.project(&self.viewport, point.0, point.1)
    }

    /// All points mapped into canvas pixels.
    pub fn projected(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(move |&p| self.project(p))
    }
}

/// Geometry built for one chart frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub size: Size,
    pub window: Window,
    pub background: Rgba,
    /// Horizontal grid lines, then vertical grid lines, then one line per series.
    pub lines: Vec<Line>,
    pub grid_lines: usize,
}

impl Frame {
    pub fn grid(&self) -> &[Line] { &self.lines[..self.grid_lines] }
    pub fn series(&self) -> &[Line] { &self.lines[self.grid_lines..] }
}

/// The drawable a chart is bound to.
pub trait Surface {
    /// Current logical size as laid out by the host.
    fn client_size(&self) -> Size;
    /// Size of the drawable backing store.
    fn size(&self) -> Size;
    fn resize(&mut self, size: Size);
}

/// External 2D line rasterizer.
pub trait LineRenderer {
    /// Clear the drawable to `color` at the given size.
    fn clear(&mut self, size: Size, color: Rgba) -> anyhow::Result<()>;
    /// Draw one batch of lines, in order.
    fn render(&mut self, lines: &[Line]) -> anyhow::Result<()>;
}
