#![forbid(unsafe_code)]

//! Stepper construction errors.

use core::fmt;

/// Errors raised while building a [`Stepper`](crate::Stepper).
///
/// Navigation never fails: moving past either end, pausing while paused, and
/// playing while playing are silent no-ops. The only rejected input is a
/// configuration the engine cannot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepperError {
    /// The step list or playback settings cannot drive a stepper.
    InvalidConfiguration(&'static str),
}

impl fmt::Display for StepperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for StepperError {}
