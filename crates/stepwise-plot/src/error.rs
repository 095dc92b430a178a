#![forbid(unsafe_code)]

//! Plot configuration errors.

use core::fmt;

/// Errors raised while building a [`PlotConfig`](crate::PlotConfig).
///
/// Sampling itself never fails: undefined or unbounded function values are
/// expected and become segment breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotError {
    /// The extents cannot define an invertible affine map.
    InvalidConfig(&'static str),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(reason) => write!(f, "invalid plot config: {reason}"),
        }
    }
}

impl std::error::Error for PlotError {}
