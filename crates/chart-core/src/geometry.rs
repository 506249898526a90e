// File: crates/chart-core/src/geometry.rs
// Summary: Pixel sizes, viewports and coordinate ranges used by line commands.

/// Logical pixel dimensions of a drawable surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }
}

/// Destination rectangle in pixels. Origin is the top-left corner of the canvas,
/// y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The whole surface.
    pub fn full(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    pub fn bottom(&self) -> f64 { self.y + self.height }
}

/// Domain of a point list: `(x_min, y_min)` maps to the bottom-left of the viewport,
/// `(x_max, y_max)` to the top-right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Range {
    pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    /// Identity mapping for pixel-space geometry inside `viewport`.
    pub fn pixels(viewport: &Viewport) -> Self {
        Self::new(0.0, 0.0, viewport.width, viewport.height)
    }

    /// Map a domain point into canvas pixels inside `viewport`.
    /// A zero-width or zero-height range yields non-finite coordinates.
    pub fn project(&self, viewport: &Viewport, x: f64, y: f64) -> (f64, f64) {
        let fx = (x - self.x_min) / (self.x_max - self.x_min);
        let fy = (y - self.y_min) / (self.y_max - self.y_min);
        (viewport.x + fx * viewport.width, viewport.bottom() - fy * viewport.height)
    }
}
