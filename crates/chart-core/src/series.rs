// File: crates/chart-core/src/series.rs
// Summary: Streaming series model: ordered samples, append validation and window eviction.
// Notes:
// - Samples are kept in a deque ordered by timestamp; eviction drains from the front.
// - `SeriesHandle` is the shared ingest side once a series is owned by a chart.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::color::Rgba;
use crate::error::{ChartError, Result};

/// One `(timestamp, value)` observation. Timestamps are milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}

/// Per-series rendering options. Values outside `min..max` are drawn off-band, not clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesOptions {
    /// Value mapped to the bottom of the series viewport.
    pub min: f64,
    /// Value mapped to the top of the series viewport.
    pub max: f64,
    pub color: Rgba,
    /// Line thickness in pixels.
    pub thickness: f64,
    /// Samples kept before the left window edge so the line enters from off-canvas.
    pub keep_before: usize,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0, color: Rgba::BLACK, thickness: 2.0, keep_before: 1 }
    }
}

impl SeriesOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(ChartError::option("thickness", format!("expected a finite value >= 0, got {}", self.thickness)));
        }
        if self.keep_before == 0 {
            return Err(ChartError::option("keep_before", "at least one sample must be kept before the window"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    options: SeriesOptions,
    samples: VecDeque<Sample>,
}

impl Default for Series {
    fn default() -> Self {
        Self { options: SeriesOptions::default(), samples: VecDeque::new() }
    }
}

impl Series {
    pub fn new(options: SeriesOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, samples: VecDeque::new() })
    }

    pub fn options(&self) -> &SeriesOptions { &self.options }
    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
    pub fn first_time(&self) -> Option<f64> { self.samples.front().map(|s| s.time) }
    pub fn last_time(&self) -> Option<f64> { self.samples.back().map(|s| s.time) }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Retained samples as `(time, value)` points.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.time, s.value)).collect()
    }

    /// Append one sample. The timestamp must be finite and not older than the last one;
    /// the value is stored as given.
    pub fn append(&mut self, time: f64, value: f64) -> Result<()> {
        check_next(self.last_time(), time, value)?;
        self.samples.push_back(Sample { time, value });
        Ok(())
    }

    /// Append a batch. The whole batch is rejected if any sample is out of order.
    pub fn extend<I, S>(&mut self, samples: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<Sample>,
    {
        let batch: Vec<Sample> = samples.into_iter().map(Into::into).collect();
        let mut last = self.last_time();
        for s in &batch {
            check_next(last, s.time, s.value)?;
            last = Some(s.time);
        }
        self.samples.extend(batch);
        Ok(())
    }

    /// Drop samples that scrolled out of view. Keeps every sample with
    /// `time >= threshold` plus up to `keep_before` samples right before it.
    /// Returns the number of samples removed.
    pub fn evict(&mut self, threshold: f64) -> usize {
        let first_visible = self.samples.partition_point(|s| s.time < threshold);
        let start = first_visible.saturating_sub(self.options.keep_before);
        if start > 0 {
            self.samples.drain(..start);
        }
        start
    }
}

fn check_next(last: Option<f64>, time: f64, value: f64) -> Result<()> {
    if !time.is_finite() {
        return Err(ChartError::NonFiniteSample { time, value });
    }
    match last {
        Some(last) if time < last => Err(ChartError::NonMonotonic { time, last }),
        _ => Ok(()),
    }
}

/// Shared access to a series owned by a chart.
///
/// Ingest code may append from any thread; the chart takes the same lock while
/// evicting and copying points for a frame, so a frame always sees a consistent
/// sequence.
#[derive(Clone, Debug)]
pub struct SeriesHandle {
    inner: Arc<Mutex<Series>>,
}

impl SeriesHandle {
    pub(crate) fn new(series: Series) -> Self {
        Self { inner: Arc::new(Mutex::new(series)) }
    }

    pub fn append(&self, time: f64, value: f64) -> Result<()> {
        self.inner.lock().append(time, value)
    }

    pub fn extend<I, S>(&self, samples: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<Sample>,
    {
        self.inner.lock().extend(samples)
    }

    pub fn len(&self) -> usize { self.inner.lock().len() }
    pub fn is_empty(&self) -> bool { self.inner.lock().is_empty() }
    pub fn points(&self) -> Vec<(f64, f64)> { self.inner.lock().points() }

    /// Lock the series for several operations at once.
    pub fn lock(&self) -> MutexGuard<'_, Series> {
        self.inner.lock()
    }
}
