#![forbid(unsafe_code)]

//! Coordinate mapping and curve plotting for lesson graphs.
//!
//! Everything here is a pure function of its inputs: a [`PlotConfig`]
//! defines the affine map between mathematical and display coordinates, and
//! [`sample_curve`] turns a one-argument function into display segments that
//! break at asymptotes, holes, and undefined regions.
//!
//! # Example
//!
//! ```
//! use stepwise_plot::{ExclusionBand, PlotConfig, SampleOptions, sample_curve};
//!
//! let config = PlotConfig::new(-10.0, 10.0, -8.0, 8.0, 600.0, 260.0).unwrap();
//! let options = SampleOptions::default()
//!     .clip(1e3)
//!     .exclude(ExclusionBand::around(3.0, 0.08));
//! let curve = sample_curve(|x| (2.0 * x + 1.0) / (x - 3.0), -10.0, 10.0, &config, &options);
//! assert_eq!(curve.segment_count(), 2);
//! ```

pub mod axis;
pub mod config;
pub mod curve;
pub mod error;
pub mod grid;
pub mod map;
pub mod path;

pub use axis::{
    Axes, DisplayLine, Orientation, asymptote_label_anchor, axes, place_axis_aligned_line,
};
pub use config::{PlotConfig, Point};
pub use curve::{
    CurveSample, DEFAULT_SAMPLE_COUNT, ExclusionBand, SampleOptions, SamplePoint, Sampling,
    Segment, sample_curve, sample_curve_excluding, sample_pieces,
};
pub use error::PlotError;
pub use grid::{GridLine, grid_lines};
pub use map::{to_display, to_math};
pub use path::{PathCommand, path_data};
