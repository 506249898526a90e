// File: crates/chart-core/src/headless.rs
// Summary: Headless collaborators for hosts without a display: canvas, recording
// line renderer, manually driven frame source and clocks.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::color::Rgba;
use crate::geometry::Size;
use crate::render::{Line, LineRenderer, Surface};
use crate::scale::Millis;
use crate::scheduler::{Clock, FrameCallback, FrameSource};

/// In-memory canvas. Clones share the client size, so a host can keep one to
/// simulate layout changes.
#[derive(Clone, Debug)]
pub struct HeadlessCanvas {
    client: Rc<Cell<Size>>,
    size: Size,
    resizes: Rc<Cell<usize>>,
}

impl HeadlessCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            client: Rc::new(Cell::new(Size::new(width, height))),
            size: Size::default(),
            resizes: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_client_size(&self, width: u32, height: u32) {
        self.client.set(Size::new(width, height));
    }

    /// Number of backing-store resizes performed so far.
    pub fn resize_count(&self) -> usize { self.resizes.get() }
}

impl Surface for HeadlessCanvas {
    fn client_size(&self) -> Size { self.client.get() }
    fn size(&self) -> Size { self.size }
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.resizes.set(self.resizes.get() + 1);
    }
}

/// One cleared-and-drawn frame as seen by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedFrame {
    pub size: Size,
    pub background: Rgba,
    pub lines: Vec<Line>,
}

/// Line renderer that keeps every submitted batch for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<RecordedFrame>>>,
    fail: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self { Self::default() }

    /// A renderer whose every draw call fails.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn frames(&self) -> Vec<RecordedFrame> { self.frames.lock().clone() }
    pub fn frame_count(&self) -> usize { self.frames.lock().len() }
    pub fn last_frame(&self) -> Option<RecordedFrame> { self.frames.lock().last().cloned() }
}

impl LineRenderer for RecordingRenderer {
    fn clear(&mut self, size: Size, color: Rgba) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("recording renderer set to fail");
        }
        self.frames.lock().push(RecordedFrame { size, background: color, lines: Vec::new() });
        Ok(())
    }

    fn render(&mut self, lines: &[Line]) -> anyhow::Result<()> {
        let mut frames = self.frames.lock();
        let frame = frames
            .last_mut()
            .ok_or_else(|| anyhow::anyhow!("render called before clear"))?;
        frame.lines.extend_from_slice(lines);
        Ok(())
    }
}

/// Frame source whose callbacks run only when the host calls [`ManualFrames::run_pending`].
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl ManualFrames {
    pub fn new() -> Self { Self::default() }

    pub fn pending(&self) -> usize { self.queue.borrow().len() }

    /// Run the callbacks queued so far; callbacks they request wait for the next call.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let n = batch.len();
        for callback in batch {
            callback();
        }
        n
    }
}

impl FrameSource for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }
    pub fn set(&self, now: Millis) { self.now.set(now); }
    pub fn advance(&self, delta: Millis) { self.now.set(self.now.get() + delta); }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis { self.now.get() }
}

/// Wall-clock milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        chrono::Utc::now().timestamp_micros() as f64 / 1000.0
    }
}
