// File: crates/chart-core/src/scale.rs
// Summary: Visible time window and time-to-pixel transform for a scrolling chart.

/// Milliseconds since an arbitrary epoch.
pub type Millis = f64;

/// The visible time range `[first, last]`, mapped onto `width` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub first: Millis,
    pub last: Millis,
    /// Milliseconds per pixel.
    pub scale: f64,
}

impl Window {
    /// Window ending at `now + offset` and spanning `width * scale` milliseconds.
    pub fn at(now: Millis, offset: Millis, width: u32, scale: f64) -> Self {
        let last = now + offset;
        let first = last - width as f64 * scale;
        Self { first, last, scale }
    }

    pub fn span(&self) -> Millis { self.last - self.first }

    /// Horizontal pixel of `t`, with the right canvas edge at `last`.
    #[inline]
    pub fn to_px(&self, t: Millis) -> f64 {
        (t - self.first) / self.scale
    }

    /// Absolute multiples of `tick` inside the window, newest first.
    pub fn ticks(&self, tick: Millis) -> impl Iterator<Item = Millis> {
        let first = self.first;
        let newest = self.last - self.last.rem_euclid(tick);
        (0u64..)
            .map(move |i| newest - i as f64 * tick)
            .take_while(move |t| *t >= first)
    }
}
