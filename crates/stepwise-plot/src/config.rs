#![forbid(unsafe_code)]

//! Plot extents: the mathematical window and the display viewport.

use crate::error::PlotError;

/// A point in either mathematical or display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point as an `(x, y)` tuple.
    #[inline]
    #[must_use]
    pub const fn to_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Whether both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Immutable parameters of one mathematical-to-display mapping.
///
/// Display coordinates grow rightward and downward from the top-left corner
/// of a `pixel_width` x `pixel_height` viewport. Every drawing call sharing
/// a config uses the same transform, so curves, axes, and asymptote lines
/// line up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPlotConfig", into = "RawPlotConfig")
)]
pub struct PlotConfig {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
    pixel_width: f64,
    pixel_height: f64,
}

impl PlotConfig {
    /// Create a config from mathematical extents and display size.
    ///
    /// # Errors
    ///
    /// [`PlotError::InvalidConfig`] if any value is non-finite, either
    /// mathematical extent is empty or reversed, or the display size is not
    /// positive.
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        range_min: f64,
        range_max: f64,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Result<Self, PlotError> {
        let values = [
            domain_min,
            domain_max,
            range_min,
            range_max,
            pixel_width,
            pixel_height,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PlotError::InvalidConfig("extents must be finite"));
        }
        if domain_max <= domain_min {
            return Err(PlotError::InvalidConfig("domain_max must exceed domain_min"));
        }
        if range_max <= range_min {
            return Err(PlotError::InvalidConfig("range_max must exceed range_min"));
        }
        if pixel_width <= 0.0 || pixel_height <= 0.0 {
            return Err(PlotError::InvalidConfig("display size must be positive"));
        }
        Ok(Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
            pixel_width,
            pixel_height,
        })
    }

    /// Create a config from the display position of the mathematical origin
    /// and a pixels-per-unit scale on each axis.
    ///
    /// # Errors
    ///
    /// [`PlotError::InvalidConfig`] if a scale is not positive or any value
    /// is non-finite.
    pub fn from_origin_scale(
        origin: Point,
        scale_x: f64,
        scale_y: f64,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Result<Self, PlotError> {
        if !(scale_x.is_finite() && scale_y.is_finite()) || scale_x <= 0.0 || scale_y <= 0.0 {
            return Err(PlotError::InvalidConfig("scale must be positive"));
        }
        Self::new(
            -origin.x / scale_x,
            (pixel_width - origin.x) / scale_x,
            (origin.y - pixel_height) / scale_y,
            origin.y / scale_y,
            pixel_width,
            pixel_height,
        )
    }

    #[inline]
    #[must_use]
    pub const fn domain_min(&self) -> f64 {
        self.domain_min
    }

    #[inline]
    #[must_use]
    pub const fn domain_max(&self) -> f64 {
        self.domain_max
    }

    #[inline]
    #[must_use]
    pub const fn range_min(&self) -> f64 {
        self.range_min
    }

    #[inline]
    #[must_use]
    pub const fn range_max(&self) -> f64 {
        self.range_max
    }

    #[inline]
    #[must_use]
    pub const fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    #[inline]
    #[must_use]
    pub const fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    /// Width of the mathematical window.
    #[inline]
    #[must_use]
    pub fn domain_span(&self) -> f64 {
        self.domain_max - self.domain_min
    }

    /// Height of the mathematical window.
    #[inline]
    #[must_use]
    pub fn range_span(&self) -> f64 {
        self.range_max - self.range_min
    }

    /// Whether a display point lies inside the viewport (edges inclusive).
    #[must_use]
    pub fn contains_display(&self, point: Point) -> bool {
        (0.0..=self.pixel_width).contains(&point.x) && (0.0..=self.pixel_height).contains(&point.y)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawPlotConfig {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
    pixel_width: f64,
    pixel_height: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPlotConfig> for PlotConfig {
    type Error = PlotError;

    fn try_from(raw: RawPlotConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.domain_min,
            raw.domain_max,
            raw.range_min,
            raw.range_max,
            raw.pixel_width,
            raw.pixel_height,
        )
    }
}

#[cfg(feature = "serde")]
impl From<PlotConfig> for RawPlotConfig {
    fn from(config: PlotConfig) -> Self {
        Self {
            domain_min: config.domain_min,
            domain_max: config.domain_max,
            range_min: config.range_min,
            range_max: config.range_max,
            pixel_width: config.pixel_width,
            pixel_height: config.pixel_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_degenerate_extents() {
        assert!(PlotConfig::new(1.0, 1.0, -1.0, 1.0, 10.0, 10.0).is_err());
        assert!(PlotConfig::new(-1.0, 1.0, 2.0, -2.0, 10.0, 10.0).is_err());
        assert!(PlotConfig::new(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0).is_err());
        assert!(PlotConfig::new(f64::NAN, 1.0, -1.0, 1.0, 10.0, 10.0).is_err());
        assert!(PlotConfig::new(-1.0, f64::INFINITY, -1.0, 1.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn reports_error_reason() {
        let err = PlotConfig::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid plot config: domain_max must exceed domain_min"
        );
    }

    #[test]
    fn from_origin_scale_matches_extents() {
        // 640x360 viewport, origin at (320, 180), 40px per unit.
        let config =
            PlotConfig::from_origin_scale(Point::new(320.0, 180.0), 40.0, 40.0, 640.0, 360.0)
                .expect("valid");
        assert_eq!(config.domain_min(), -8.0);
        assert_eq!(config.domain_max(), 8.0);
        assert_eq!(config.range_min(), -4.5);
        assert_eq!(config.range_max(), 4.5);
    }

    #[test]
    fn from_origin_scale_rejects_bad_scale() {
        assert!(PlotConfig::from_origin_scale(Point::default(), 0.0, 1.0, 10.0, 10.0).is_err());
        assert!(PlotConfig::from_origin_scale(Point::default(), 1.0, -2.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn contains_display_includes_edges() {
        let config = PlotConfig::new(0.0, 1.0, 0.0, 1.0, 100.0, 50.0).expect("valid");
        assert!(config.contains_display(Point::new(0.0, 0.0)));
        assert!(config.contains_display(Point::new(100.0, 50.0)));
        assert!(!config.contains_display(Point::new(100.1, 10.0)));
        assert!(!config.contains_display(Point::new(10.0, -0.1)));
    }
}
