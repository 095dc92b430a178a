#![forbid(unsafe_code)]

//! Core: step sequencing, timed playback, and the capabilities a lesson page
//! supplies to drive its visuals.

pub mod error;
pub mod logging;
pub mod scheduler;
pub mod step;
pub mod stepper;
pub mod surface;

pub use error::StepperError;
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle};
pub use step::Step;
pub use stepper::{Control, Stepper, StepperConfig, StepperState};
pub use surface::{ControlFlags, MemorySurface, StepperView, VisualSink};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
