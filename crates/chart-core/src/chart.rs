// File: crates/chart-core/src/chart.rs
// Summary: Chart options and the per-frame pipeline: canvas sync, time window,
// eviction, grid and series geometry, submission to the line renderer.

use crate::color::Rgba;
use crate::error::{ChartError, Result};
use crate::geometry::{Range, Size, Viewport};
use crate::grid::{horizontal_lines, vertical_lines, GridStyle};
use crate::render::{Frame, Line, LineRenderer, Surface};
use crate::scale::{Millis, Window};
use crate::series::{Series, SeriesHandle, SeriesOptions};

/// Chart configuration, fixed once the chart is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    /// Default value-axis minimum for series created via [`ChartOptions::series_options`].
    pub min: f64,
    /// Default value-axis maximum for series created via [`ChartOptions::series_options`].
    pub max: f64,
    /// Milliseconds per pixel.
    pub scale: f64,
    /// Added to the frame timestamp to get the right window edge, in milliseconds.
    pub offset: Millis,
    /// Give each series its own horizontal band.
    pub stack: bool,
    pub background: Rgba,
    /// Grid color.
    pub foreground: Rgba,
    /// Grid thickness in pixels.
    pub thickness: f64,
    /// Horizontal grid bands (per series when stacking).
    pub sections: usize,
    /// Interval between vertical grid lines, in milliseconds.
    pub tick: Millis,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            scale: 20.0,
            offset: -150.0,
            stack: false,
            background: Rgba::from_rgb8(0xe8, 0xe8, 0xe8),
            foreground: Rgba::from_rgb8(0x80, 0x80, 0x80),
            thickness: 1.0,
            sections: 2,
            tick: 1000.0,
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &'static str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ChartError::option(name, format!("expected a finite value > 0, got {v}")))
            }
        };
        positive("scale", self.scale)?;
        positive("tick", self.tick)?;
        if !self.offset.is_finite() {
            return Err(ChartError::option("offset", "must be finite"));
        }
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(ChartError::option("thickness", format!("expected a finite value >= 0, got {}", self.thickness)));
        }
        if self.sections == 0 {
            return Err(ChartError::option("sections", "at least one section is required"));
        }
        Ok(())
    }

    /// Series options inheriting this chart's value-axis defaults.
    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions { min: self.min, max: self.max, ..SeriesOptions::default() }
    }

    fn grid_style(&self) -> GridStyle {
        GridStyle { thickness: self.thickness, color: self.foreground }
    }
}

pub struct Chart {
    options: ChartOptions,
    series: Vec<SeriesHandle>,
    canvas: Box<dyn Surface>,
    renderer: Box<dyn LineRenderer>,
    /// Backend failures since the last frame that drew.
    failures: u64,
}

impl Chart {
    pub fn new(
        canvas: impl Surface + 'static,
        renderer: impl LineRenderer + 'static,
        options: ChartOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            series: Vec::new(),
            canvas: Box::new(canvas),
            renderer: Box::new(renderer),
            failures: 0,
        })
    }

    pub fn options(&self) -> &ChartOptions { &self.options }

    /// Take ownership of `series`; later series draw on top (or in higher bands when stacking).
    /// The returned handle keeps feeding samples into it.
    pub fn add_series(&mut self, series: Series) -> SeriesHandle {
        let handle = SeriesHandle::new(series);
        self.series.push(handle.clone());
        handle
    }

    pub fn series(&self) -> &[SeriesHandle] { &self.series }

    /// Consecutive frames the line renderer rejected; reset by the next frame that draws.
    pub fn consecutive_failures(&self) -> u64 { self.failures }

    /// Match the drawable to the canvas client size.
    pub fn sync_size(&mut self) -> Size {
        let client = self.canvas.client_size();
        if self.canvas.size() != client {
            tracing::debug!(width = client.width, height = client.height, "resizing chart canvas");
            self.canvas.resize(client);
        }
        client
    }

    /// Visible window for a frame at `now`, given the canvas width.
    pub fn window(&self, now: Millis, width: u32) -> Window {
        Window::at(now, self.options.offset, width, self.options.scale)
    }

    /// Build the geometry for a frame at `now`. Evicts samples left of the window.
    pub fn build_frame(&mut self, now: Millis) -> Frame {
        let size = self.sync_size();
        let window = self.window(now, size.width);

        let evicted: usize = self.series.iter().map(|s| s.lock().evict(window.first)).sum();
        if evicted > 0 {
            tracing::trace!(evicted, first = window.first, "evicted samples");
        }

        let count = self.series.len();
        let bands = if self.options.stack { self.options.sections * count } else { self.options.sections };
        let style = self.options.grid_style();
        let mut lines = horizontal_lines(size, bands, &style);
        lines.extend(vertical_lines(size, &window, self.options.tick, &style));
        let grid_lines = lines.len();

        let full = Viewport::full(size);
        let band_height = size.height as f64 / count as f64;
        for (i, handle) in self.series.iter().enumerate() {
            let viewport = if self.options.stack {
                // First series takes the bottom band.
                Viewport::new(0.0, size.height as f64 - band_height * (i + 1) as f64, full.width, band_height)
            } else {
                full
            };
            let series = handle.lock();
            let opts = series.options();
            lines.push(Line {
                thickness: opts.thickness,
                color: opts.color,
                points: series.points(),
                closed: false,
                viewport,
                range: Range::new(window.first, opts.min, window.last, opts.max),
            });
        }

        Frame { size, window, background: self.options.background, lines, grid_lines }
    }

    /// Draw a frame at `now`. Backend failures are logged and the frame is dropped;
    /// only the first of a run of failures is a warning.
    pub fn render(&mut self, now: Millis) {
        let frame = self.build_frame(now);
        tracing::trace!(
            lines = frame.lines.len(),
            first = frame.window.first,
            last = frame.window.last,
            "render chart frame"
        );
        let submitted = self
            .renderer
            .clear(frame.size, frame.background)
            .and_then(|_| self.renderer.render(&frame.lines));
        match submitted {
            Ok(()) => {
                if self.failures > 0 {
                    tracing::debug!(failures = self.failures, "line renderer recovered");
                }
                self.failures = 0;
            }
            Err(e) => {
                if self.failures == 0 {
                    tracing::warn!(error = %e, "line renderer failed; skipping frames until it recovers");
                } else {
                    tracing::debug!(error = %e, failures = self.failures, "line renderer still failing");
                }
                self.failures += 1;
            }
        }
    }
}
