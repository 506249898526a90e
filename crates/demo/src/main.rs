// File: crates/demo/src/main.rs
// Summary: Demo replays a CSV sensor log (or a synthetic sine stream) through a stacked
// chart driven by the scheduler, then writes the last frame to PNG.

use std::cell::RefCell;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use chart_core::headless::{HeadlessCanvas, ManualClock, ManualFrames};
use chart_core::{
    Chart, ChartOptions, Clock, Line, LineRenderer, Rgba, Scheduler, Series, SeriesHandle, SeriesOptions, Size,
};
use chart_render_skia::SkiaLineRenderer;
use tracing_subscriber::EnvFilter;

const PALETTE: [&str; 4] = ["#D62728", "#1F77B4", "#2CA02C", "#FF7F0E"];

/// One column of a sensor log.
struct Channel {
    name: String,
    samples: Vec<(f64, f64)>,
}

/// Lets the demo keep access to the raster after handing it to the chart.
#[derive(Clone)]
struct SharedRenderer(Rc<RefCell<SkiaLineRenderer>>);

impl LineRenderer for SharedRenderer {
    fn clear(&mut self, size: Size, color: Rgba) -> Result<()> {
        self.0.borrow_mut().clear(size, color)
    }
    fn render(&mut self, lines: &[Line]) -> Result<()> {
        self.0.borrow_mut().render(lines)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let frames: u32 = env_or("FRAMES", 180);
    let fps: f64 = env_or("FPS", 60.0);

    let (channels, out) = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            let channels = load_channels_csv(&path)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            (channels, out_name(&path))
        }
        None => (synthetic_channels(frames, fps), PathBuf::from("target/out/sensor_synthetic.png")),
    };
    if channels.is_empty() || channels.iter().all(|c| c.samples.is_empty()) {
        anyhow::bail!("no samples loaded; expected a time column and at least one value column");
    }
    for c in &channels {
        tracing::info!(channel = %c.name, samples = c.samples.len(), "loaded channel");
    }

    let renderer = SharedRenderer(Rc::new(RefCell::new(SkiaLineRenderer::new())));
    let mut chart = Chart::new(
        HeadlessCanvas::new(800, 150 * channels.len() as u32),
        renderer.clone(),
        ChartOptions { stack: channels.len() > 1, scale: 10.0, ..ChartOptions::default() },
    )?;

    let mut feeds = Vec::with_capacity(channels.len());
    for (i, channel) in channels.into_iter().enumerate() {
        let (min, max) = value_range(&channel.samples);
        let options = SeriesOptions {
            min,
            max,
            color: Rgba::parse(PALETTE[i % PALETTE.len()])?,
            ..chart.options().series_options()
        };
        let handle = chart.add_series(Series::new(options)?);
        feeds.push((handle, channel.samples.into_iter().peekable()));
    }

    // Replay time starts at the first sample and advances one frame interval per tick.
    let start = feeds
        .iter_mut()
        .filter_map(|(_, it)| it.peek().map(|s| s.0))
        .fold(f64::INFINITY, f64::min);
    let clock = ManualClock::new(start);
    let frame_source = ManualFrames::new();
    let scheduler = Scheduler::new(clock.clone(), frame_source.clone()).with_fps_observer({
        let mut n = 0u64;
        move |fps| {
            n += 1;
            if n % 60 == 0 {
                tracing::info!(frame = n, fps, "render rate");
            }
        }
    });
    scheduler.add_chart(chart);

    let interval = Duration::from_secs_f64(1.0 / fps.max(1.0));
    feed_until(clock.now(), &mut feeds)?;
    scheduler.start();
    for _ in 1..frames {
        std::thread::sleep(interval);
        clock.advance(interval.as_secs_f64() * 1000.0);
        feed_until(clock.now(), &mut feeds)?;
        frame_source.run_pending();
    }
    scheduler.stop();
    frame_source.run_pending();
    tracing::info!(frames = scheduler.frame_count(), "replay finished");

    renderer.0.borrow_mut().save_png(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Append every pending sample stamped at or before `now`.
fn feed_until<I>(now: f64, feeds: &mut [(SeriesHandle, Peekable<I>)]) -> Result<()>
where
    I: Iterator<Item = (f64, f64)>,
{
    for (handle, it) in feeds.iter_mut() {
        while let Some(&(t, v)) = it.peek() {
            if t > now {
                break;
            }
            handle.append(t, v)?;
            it.next();
        }
    }
    Ok(())
}

/// Produce output file name like target/out/sensor_<stem>.png
fn out_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("sensor_{stem}.png"))
}

/// Load a sensor log: one time column plus any number of numeric value columns.
fn load_channels_csv(path: &Path) -> Result<Vec<Channel>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let i_time = headers
        .iter()
        .position(|h| ["time", "timestamp", "t", "ms", "time_ms"].contains(&h.as_str()))
        .context("no time column (time/timestamp/t/ms)")?;
    let mut channels: Vec<(usize, Channel)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != i_time)
        .map(|(i, h)| (i, Channel { name: h.clone(), samples: Vec::new() }))
        .collect();

    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let Some(t) = rec.get(i_time).and_then(parse_time_ms) else {
            skipped += 1;
            continue;
        };
        for (i, channel) in channels.iter_mut() {
            if let Some(v) = rec.get(*i).and_then(|s| s.trim().parse::<f64>().ok()) {
                // Out-of-order rows would be rejected by the series; drop them here.
                if channel.samples.last().map_or(true, |&(last, _)| t >= last) {
                    channel.samples.push((t, v));
                }
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "rows without a usable timestamp");
    }
    Ok(channels.into_iter().map(|(_, c)| c).collect())
}

/// Milliseconds; integer epoch seconds are scaled up.
fn parse_time_ms(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        if (10_i64.pow(9)..10_i64.pow(11)).contains(&n) {
            return Some(n as f64 * 1000.0);
        } // epoch sec -> ms
        return Some(n as f64);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn synthetic_channels(frames: u32, fps: f64) -> Vec<Channel> {
    // 250 Hz sensor covering the whole replay.
    let duration_ms = frames as f64 * 1000.0 / fps.max(1.0);
    let n = (duration_ms / 4.0) as usize + 1;
    let wave = |name: &str, f: fn(f64) -> f64| Channel {
        name: name.to_string(),
        samples: (0..n).map(|i| (i as f64 * 4.0, f(i as f64 * 0.004))).collect(),
    };
    vec![
        wave("sine", |s| (s * std::f64::consts::TAU).sin()),
        wave("chirp", |s| (s * s * 6.0).sin() * 0.8),
    ]
}

fn value_range(samples: &[(f64, f64)]) -> (f64, f64) {
    let (lo, hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() || (hi - lo).abs() < 1e-9 {
        return (-1.0, 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}
