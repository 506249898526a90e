// File: crates/chart-core/src/scheduler.rs
// Summary: Frame-synchronized render loop over a set of charts with live FPS measurement.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::chart::Chart;
use crate::scale::Millis;

/// A frame callback handed to the host.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Host primitive that runs a callback once, before the next repaint.
pub trait FrameSource {
    fn request_frame(&self, callback: FrameCallback);
}

/// Millisecond time source read once per tick.
pub trait Clock {
    fn now(&self) -> Millis;
}

struct LoopState {
    running: bool,
    /// Bumped by every `start()`; ticks requested by an earlier run are dropped.
    epoch: u64,
    last: Millis,
    frames: u64,
    on_fps: Option<Box<dyn FnMut(f64)>>,
}

struct Shared {
    clock: Box<dyn Clock>,
    source: Box<dyn FrameSource>,
    state: RefCell<LoopState>,
    charts: RefCell<Vec<Rc<RefCell<Chart>>>>,
}

/// Ticks every chart once per host frame, all with the same timestamp.
///
/// `stop()` only prevents rescheduling: a tick already requested from the
/// frame source still runs, then the loop ends. Dropping the last `Scheduler`
/// handle ends the loop as well.
#[derive(Clone)]
pub struct Scheduler {
    shared: Rc<Shared>,
}

impl Scheduler {
    pub fn new(clock: impl Clock + 'static, source: impl FrameSource + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                clock: Box::new(clock),
                source: Box::new(source),
                state: RefCell::new(LoopState { running: false, epoch: 0, last: 0.0, frames: 0, on_fps: None }),
                charts: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Receive the instantaneous frame rate of every tick.
    pub fn with_fps_observer(self, observer: impl FnMut(f64) + 'static) -> Self {
        self.shared.state.borrow_mut().on_fps = Some(Box::new(observer));
        self
    }

    /// Charts added while a tick is rendering are drawn from the next tick on.
    pub fn add_chart(&self, chart: Chart) {
        self.shared.charts.borrow_mut().push(Rc::new(RefCell::new(chart)));
    }

    pub fn chart_count(&self) -> usize { self.shared.charts.borrow().len() }
    pub fn is_running(&self) -> bool { self.shared.state.borrow().running }
    /// Ticks executed since construction.
    pub fn frame_count(&self) -> u64 { self.shared.state.borrow().frames }

    /// Run the first tick now and keep rescheduling until stopped.
    pub fn start(&self) {
        let epoch = {
            let mut state = self.shared.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
            state.epoch += 1;
            state.last = 0.0;
            state.epoch
        };
        tracing::debug!(epoch, "scheduler started");
        tick(&self.shared, epoch);
    }

    pub fn stop(&self) {
        self.shared.state.borrow_mut().running = false;
        tracing::debug!("scheduler stopped");
    }
}

fn tick(shared: &Rc<Shared>, epoch: u64) {
    if shared.state.borrow().epoch != epoch {
        return;
    }
    let now = shared.clock.now();
    let (fps, mut observer) = {
        let mut state = shared.state.borrow_mut();
        let fps = 1000.0 / (now - state.last);
        state.last = now;
        state.frames += 1;
        (fps, state.on_fps.take())
    };
    // The observer runs outside the borrow so it may call `stop()`.
    if let Some(cb) = observer.as_mut() {
        cb(fps);
    }
    shared.state.borrow_mut().on_fps = observer;

    // Renderers run with no scheduler borrow held, so they may call back into it.
    let charts = shared.charts.borrow().clone();
    for chart in &charts {
        chart.borrow_mut().render(now);
    }
    tracing::trace!(now, fps, "scheduler tick");

    if shared.state.borrow().running {
        let next: Weak<Shared> = Rc::downgrade(shared);
        shared.source.request_frame(Box::new(move || {
            if let Some(shared) = next.upgrade() {
                tick(&shared, epoch);
            }
        }));
    }
}
