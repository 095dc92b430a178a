#![forbid(unsafe_code)]

//! Background grid generation.

use crate::axis::{DisplayLine, Orientation, place_axis_aligned_line};
use crate::config::PlotConfig;

/// Maximum grid lines per orientation.
const MAX_LINES: usize = 4096;

/// Relative tolerance when deciding whether a grid value is a multiple of a step.
const MULTIPLE_SLACK: f64 = 1e-9;

/// One grid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub line: DisplayLine,
    pub orientation: Orientation,
    /// Drawn heavier than minor lines.
    pub major: bool,
}

/// Grid lines at every multiple of `minor_step` inside the mathematical
/// window: vertical lines first, then horizontal, each in increasing value.
///
/// A line is major when its value is also a multiple of `major_step`.
/// Returns an empty grid when either step is non-positive or non-finite.
///
/// When `minor_step` would put more than 4096 lines on one axis,
/// that axis steps by an integer multiple of `minor_step` that fits under
/// the cap, so the grid still spans the whole window.
#[must_use]
pub fn grid_lines(config: &PlotConfig, minor_step: f64, major_step: f64) -> Vec<GridLine> {
    if !(valid_step(minor_step) && valid_step(major_step)) {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for (orientation, min, max) in [
        (Orientation::Vertical, config.domain_min(), config.domain_max()),
        (Orientation::Horizontal, config.range_min(), config.range_max()),
    ] {
        let Some((step, first, count)) = line_range(min, max, minor_step) else {
            continue;
        };
        for k in 0..count {
            let value = (first + k as f64) * step;
            lines.push(GridLine {
                line: place_axis_aligned_line(orientation, value, config),
                orientation,
                major: is_multiple(value, major_step),
            });
        }
    }
    lines
}

/// Step, first multiple index and line count for one axis.
fn line_range(min: f64, max: f64, minor_step: f64) -> Option<(f64, f64, usize)> {
    let (first, last) = multiples(min, max, minor_step)?;
    let span = last - first;
    if span <= (MAX_LINES - 1) as f64 {
        return Some((minor_step, first, span as usize + 1));
    }
    // Stride leaves one line of headroom for rounding in the coarse range.
    let stride = (span / (MAX_LINES - 2) as f64).ceil();
    let step = minor_step * stride;
    let (first, last) = multiples(min, max, step)?;
    let span = (last - first).min((MAX_LINES - 1) as f64);
    Some((step, first, span as usize + 1))
}

/// Indices of the first and last multiples of `step` inside `[min, max]`.
fn multiples(min: f64, max: f64, step: f64) -> Option<(f64, f64)> {
    let first = (min / step - MULTIPLE_SLACK).ceil();
    let last = (max / step + MULTIPLE_SLACK).floor();
    (first.is_finite() && last.is_finite() && last >= first).then_some((first, last))
}

fn valid_step(step: f64) -> bool {
    step.is_finite() && step > 0.0
}

fn is_multiple(value: f64, step: f64) -> bool {
    let ratio = value / step;
    (ratio - ratio.round()).abs() <= MULTIPLE_SLACK * ratio.abs().max(1.0)
}
