// File: crates/chart-core/src/error.rs
// Summary: Error kinds raised at the construction/append validation boundary.

use thiserror::Error;

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Color strings must be `#RRGGBB`, `RRGGBB` or one of the known names.
    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    /// Samples must be appended in non-decreasing timestamp order.
    #[error("sample at t={time} is older than the last sample at t={last}")]
    NonMonotonic { time: f64, last: f64 },

    #[error("sample timestamp must be finite (t={time}, v={value})")]
    NonFiniteSample { time: f64, value: f64 },

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

impl ChartError {
    pub(crate) fn option(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption { name, reason: reason.into() }
    }
}
