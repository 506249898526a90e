// File: crates/chart-core/src/grid.rs
// Summary: Background grid layout: evenly spaced bands and time-anchored tick lines.

use crate::color::Rgba;
use crate::geometry::{Size, Viewport};
use crate::render::Line;
use crate::scale::{Millis, Window};

#[derive(Clone, Copy, Debug)]
pub struct GridStyle {
    pub thickness: f64,
    pub color: Rgba,
}

impl GridStyle {
    /// Odd stroke widths sit on half pixels to stay sharp.
    pub fn crisp_offset(&self) -> f64 {
        if self.thickness % 2.0 == 0.0 { 0.0 } else { 0.5 }
    }
}

/// `bands - 1` horizontal lines splitting the canvas into `bands` equal rows.
pub fn horizontal_lines(size: Size, bands: usize, style: &GridStyle) -> Vec<Line> {
    let viewport = Viewport::full(size);
    let width = size.width as f64;
    let interval = (size.height as f64 / bands as f64).round();
    let offset = style.crisp_offset();
    (1..bands)
        .map(|i| {
            let y = interval * i as f64 + offset;
            Line::segment(style.thickness, style.color, (0.0, y), (width, y), viewport)
        })
        .collect()
}

/// One vertical line per absolute multiple of `tick` inside `window`, newest first.
pub fn vertical_lines(size: Size, window: &Window, tick: Millis, style: &GridStyle) -> Vec<Line> {
    let viewport = Viewport::full(size);
    let height = size.height as f64;
    let offset = style.crisp_offset();
    window
        .ticks(tick)
        .map(|t| {
            let x = window.to_px(t) + offset;
            Line::segment(style.thickness, style.color, (x, 0.0), (x, height), viewport)
        })
        .collect()
}
