// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the streaming series, chart pipeline and scheduler.

pub mod chart;
pub mod color;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod headless;
pub mod render;
pub mod scale;
pub mod scheduler;
pub mod series;

pub use chart::{Chart, ChartOptions};
pub use color::Rgba;
pub use error::{ChartError, Result};
pub use geometry::{Range, Size, Viewport};
pub use render::{Frame, Line, LineRenderer, Surface};
pub use scale::{Millis, Window};
pub use scheduler::{Clock, FrameCallback, FrameSource, Scheduler};
pub use series::{Sample, Series, SeriesHandle, SeriesOptions};
