#![forbid(unsafe_code)]

//! Axis-aligned display lines: axes, asymptotes, and their labels.

use crate::config::{PlotConfig, Point};
use crate::map::to_display;

/// Direction of an axis-aligned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Constant `y`, spanning the viewport width.
    Horizontal,
    /// Constant `x`, spanning the viewport height.
    Vertical,
}

/// A straight line in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayLine {
    pub from: Point,
    pub to: Point,
}

impl DisplayLine {
    #[must_use]
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Endpoints as tuples, ready for a geometry sink.
    #[must_use]
    pub const fn endpoints(&self) -> [(f64, f64); 2] {
        [self.from.to_tuple(), self.to.to_tuple()]
    }
}

/// Full-width or full-height line at mathematical coordinate `value`.
///
/// A vertical line sits at `x = value`, a horizontal one at `y = value`.
/// Uses the same transform as curve sampling, so an asymptote line drawn
/// here lines up with the curve's break.
#[must_use]
pub fn place_axis_aligned_line(
    orientation: Orientation,
    value: f64,
    config: &PlotConfig,
) -> DisplayLine {
    match orientation {
        Orientation::Vertical => {
            let px = to_display(value, 0.0, config).x;
            DisplayLine::new(Point::new(px, 0.0), Point::new(px, config.pixel_height()))
        }
        Orientation::Horizontal => {
            let py = to_display(0.0, value, config).y;
            DisplayLine::new(Point::new(0.0, py), Point::new(config.pixel_width(), py))
        }
    }
}

/// The two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    /// `y = 0`.
    pub x_axis: DisplayLine,
    /// `x = 0`.
    pub y_axis: DisplayLine,
}

/// Axes through the mathematical origin. They may lie outside the viewport
/// when the window does not contain zero.
#[must_use]
pub fn axes(config: &PlotConfig) -> Axes {
    Axes {
        x_axis: place_axis_aligned_line(Orientation::Horizontal, 0.0, config),
        y_axis: place_axis_aligned_line(Orientation::Vertical, 0.0, config),
    }
}

/// Label offset from a vertical asymptote, to the right of the line.
const VERTICAL_LABEL_DX: f64 = 6.0;
/// Label baseline for vertical asymptotes, near the top edge.
const VERTICAL_LABEL_Y: f64 = 18.0;
/// Label inset for horizontal asymptotes, near the left edge.
const HORIZONTAL_LABEL_X: f64 = 10.0;
/// Label offset above a horizontal asymptote.
const HORIZONTAL_LABEL_DY: f64 = 7.0;

/// Where to anchor the text label of an asymptote at `value`.
#[must_use]
pub fn asymptote_label_anchor(orientation: Orientation, value: f64, config: &PlotConfig) -> Point {
    let line = place_axis_aligned_line(orientation, value, config);
    match orientation {
        Orientation::Vertical => Point::new(line.from.x + VERTICAL_LABEL_DX, VERTICAL_LABEL_Y),
        Orientation::Horizontal => Point::new(HORIZONTAL_LABEL_X, line.from.y - HORIZONTAL_LABEL_DY),
    }
}
