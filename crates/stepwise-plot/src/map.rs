#![forbid(unsafe_code)]

//! Affine map between mathematical and display coordinates.

use crate::config::{PlotConfig, Point};

/// Map a mathematical point into display coordinates.
///
/// The vertical axis is flipped: mathematical `y` grows upward, display `y`
/// grows downward. Points outside the mathematical window map outside the
/// viewport; callers decide whether to clip.
#[inline]
#[must_use]
pub fn to_display(x: f64, y: f64, config: &PlotConfig) -> Point {
    let px = (x - config.domain_min()) / config.domain_span() * config.pixel_width();
    let py = config.pixel_height()
        - (y - config.range_min()) / config.range_span() * config.pixel_height();
    Point::new(px, py)
}

/// Inverse of [`to_display`].
#[inline]
#[must_use]
pub fn to_math(px: f64, py: f64, config: &PlotConfig) -> Point {
    let x = config.domain_min() + px / config.pixel_width() * config.domain_span();
    let y = config.range_min()
        + (config.pixel_height() - py) / config.pixel_height() * config.range_span();
    Point::new(x, y)
}

impl PlotConfig {
    /// See [`to_display`].
    #[inline]
    #[must_use]
    pub fn to_display(&self, x: f64, y: f64) -> Point {
        to_display(x, y, self)
    }

    /// See [`to_math`].
    #[inline]
    #[must_use]
    pub fn to_math(&self, px: f64, py: f64) -> Point {
        to_math(px, py, self)
    }
}
