#![forbid(unsafe_code)]

//! Stepwise public facade crate.
//!
//! Re-exports the stepper engine and the plotting helpers, adds a
//! lightweight prelude, and provides [`draw`] glue that writes plot geometry
//! into a lesson page's [`VisualSink`].

use std::fmt;

pub mod draw;

// --- Stepper re-exports ----------------------------------------------------

pub use stepwise_core::stepper::{DEFAULT_INTERVAL, DEFAULT_INTRO};
pub use stepwise_core::{
    Control, ControlFlags, ManualScheduler, MemorySurface, Scheduler, Step, Stepper,
    StepperConfig, StepperError, StepperState, StepperView, TimerHandle, VisualSink,
};

// --- Plot re-exports -------------------------------------------------------

pub use stepwise_plot::{
    Axes, CurveSample, DEFAULT_SAMPLE_COUNT, DisplayLine, ExclusionBand, GridLine, Orientation,
    PathCommand, PlotConfig, PlotError, Point, SampleOptions, SamplePoint, Sampling, Segment,
    asymptote_label_anchor, axes, grid_lines, path_data, place_axis_aligned_line, sample_curve,
    sample_curve_excluding, sample_pieces, to_display, to_math,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for lesson pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stepper could not be built.
    Stepper(StepperError),
    /// A plot config was rejected.
    Plot(PlotError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stepper(err) => write!(f, "{err}"),
            Self::Plot(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stepper(err) => Some(err),
            Self::Plot(err) => Some(err),
        }
    }
}

impl From<StepperError> for Error {
    fn from(err: StepperError) -> Self {
        Self::Stepper(err)
    }
}

impl From<PlotError> for Error {
    fn from(err: PlotError) -> Self {
        Self::Plot(err)
    }
}

/// Standard result type for stepwise APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::draw::{draw_asymptote, draw_curve, draw_grid, draw_line};
    pub use crate::{
        Control, ControlFlags, ExclusionBand, Error, ManualScheduler, MemorySurface,
        Orientation, PlotConfig, Point, Result, SampleOptions, Scheduler, Step, Stepper,
        StepperConfig, StepperView, VisualSink,
    };

    pub use crate::{core, plot};
}

pub use stepwise_core as core;
pub use stepwise_plot as plot;
