// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia CPU raster line renderer; draws chart-core line batches and encodes PNG snapshots.

use anyhow::{anyhow, bail, Result};
use chart_core::{Line, LineRenderer, Rgba, Size};
use skia_safe as skia;

pub struct SkiaLineRenderer {
    surface: Option<skia::Surface>,
    size: Size,
    anti_alias: bool,
}

impl Default for SkiaLineRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaLineRenderer {
    pub fn new() -> Self {
        Self { surface: None, size: Size::default(), anti_alias: true }
    }

    /// Disable anti-aliasing (useful for pixel-exact snapshots).
    pub fn with_anti_alias(mut self, on: bool) -> Self {
        self.anti_alias = on;
        self
    }

    pub fn size(&self) -> Size { self.size }

    /// Encode the current surface as PNG.
    pub fn png_bytes(&mut self) -> Result<Vec<u8>> {
        let surface = self.surface.as_mut().ok_or_else(|| anyhow!("nothing rendered yet"))?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write the current surface to `path` as PNG, creating parent directories.
    pub fn save_png(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.png_bytes()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn surface_for(&mut self, size: Size) -> Result<&mut skia::Surface> {
        if size.is_empty() {
            bail!("cannot raster a {}x{} surface", size.width, size.height);
        }
        if self.surface.is_none() || self.size != size {
            let surface = skia::surfaces::raster_n32_premul((size.width as i32, size.height as i32))
                .ok_or_else(|| anyhow!("failed to create raster surface"))?;
            tracing::debug!(width = size.width, height = size.height, "created raster surface");
            self.surface = Some(surface);
            self.size = size;
        }
        self.surface.as_mut().ok_or_else(|| anyhow!("raster surface missing"))
    }
}

impl LineRenderer for SkiaLineRenderer {
    fn clear(&mut self, size: Size, color: Rgba) -> Result<()> {
        let surface = self.surface_for(size)?;
        surface.canvas().clear(to_skia(color));
        Ok(())
    }

    fn render(&mut self, lines: &[Line]) -> Result<()> {
        let anti_alias = self.anti_alias;
        let surface = self.surface.as_mut().ok_or_else(|| anyhow!("render called before clear"))?;
        let canvas = surface.canvas();
        let mut skipped = 0usize;
        for line in lines {
            if !draw_line(canvas, line, anti_alias) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::trace!(skipped, "skipped degenerate lines");
        }
        Ok(())
    }
}

fn to_skia(c: Rgba) -> skia::Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(channel(c.a), channel(c.r), channel(c.g), channel(c.b))
}

/// Returns false when the line had nothing drawable.
fn draw_line(canvas: &skia::Canvas, line: &Line, anti_alias: bool) -> bool {
    let mut pts = line
        .projected()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (x as f32, y as f32));
    let Some(start) = pts.next() else { return false };

    let mut path = skia::Path::new();
    path.move_to(start);
    let mut segments = 0;
    for p in pts {
        path.line_to(p);
        segments += 1;
    }
    if segments == 0 {
        return false;
    }
    if line.closed {
        path.close();
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(anti_alias);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(line.thickness as f32);
    stroke.set_color(to_skia(line.color));

    let vp = &line.viewport;
    canvas.save();
    canvas.clip_rect(
        skia::Rect::from_xywh(vp.x as f32, vp.y as f32, vp.width as f32, vp.height as f32),
        None,
        None,
    );
    canvas.draw_path(&path, &stroke);
    canvas.restore();
    true
}
