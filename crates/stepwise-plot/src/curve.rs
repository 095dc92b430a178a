#![forbid(unsafe_code)]

//! Function sampling into broken polylines.
//!
//! A curve is sampled on a uniform grid of abscissae. Each sample is either
//! kept, extending the current segment, or excluded, which closes the
//! current segment. Segments are never joined across an excluded sample, so
//! a rational function's graph breaks at every vertical asymptote and hole
//! the caller describes.
//!
//! A sample is excluded when any of the following holds, checked in order:
//!
//! 1. `x` is non-finite.
//! 2. `x` falls inside an [`ExclusionBand`] or the caller's predicate holds.
//!    The function is not evaluated for these samples.
//! 3. `f(x)` is non-finite.
//! 4. `|f(x)|` exceeds the magnitude clip.
//! 5. The display point lies further outside the viewport than the display
//!    margin allows.

use crate::config::{PlotConfig, Point};
use crate::map::to_display;
use crate::path::{PathCommand, path_data};

/// Uniform interval count used when no sampling is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 220;

/// Upper bound on samples per curve, whatever the sampling parameters.
const MAX_SAMPLES: usize = 1 << 20;

/// Tolerance for the final step landing on the interval end.
const STEP_SLACK: f64 = 1e-9;

/// How abscissae are placed across the sampled interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// `n` uniform intervals, giving `n + 1` samples with both ends included.
    /// `0` is treated as `1`.
    Count(usize),
    /// A fixed step in domain units, starting at the interval start.
    /// Non-positive or non-finite steps produce no samples. A step too fine
    /// for the per-curve sample cap falls back to the most uniform intervals
    /// the cap allows, still ending at the interval end.
    Step(f64),
}

impl Default for Sampling {
    fn default() -> Self {
        Self::Count(DEFAULT_SAMPLE_COUNT)
    }
}

impl Sampling {
    fn abscissae(self, start: f64, end: f64) -> Abscissae {
        let empty = Abscissae {
            start,
            end,
            dx: 0.0,
            next: 0,
            total: 0,
            divisions: None,
        };
        if !(start.is_finite() && end.is_finite()) || start > end {
            return empty;
        }
        match self {
            Self::Count(n) => {
                let n = n.clamp(1, MAX_SAMPLES - 1);
                let total = if start == end { 1 } else { n + 1 };
                Abscissae {
                    dx: (end - start) / n as f64,
                    total,
                    divisions: Some(n),
                    ..empty
                }
            }
            Self::Step(dx) => {
                if !(dx.is_finite() && dx > 0.0) {
                    return empty;
                }
                let steps = ((end - start) / dx + STEP_SLACK).floor();
                if steps.is_finite() && steps < (MAX_SAMPLES - 1) as f64 {
                    Abscissae {
                        dx,
                        total: steps as usize + 1,
                        ..empty
                    }
                } else {
                    Self::Count(MAX_SAMPLES - 1).abscissae(start, end)
                }
            }
        }
    }
}

/// Iterator over sample abscissae. Each `x` is computed from its index so
/// rounding never accumulates.
#[derive(Debug, Clone)]
struct Abscissae {
    start: f64,
    end: f64,
    dx: f64,
    next: usize,
    total: usize,
    divisions: Option<usize>,
}

impl Iterator for Abscissae {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.total {
            return None;
        }
        let i = self.next;
        self.next += 1;
        let x = match self.divisions {
            Some(n) if i == n => self.end,
            Some(n) => self.start + (i as f64 / n as f64) * (self.end - self.start),
            None => (self.start + i as f64 * self.dx).min(self.end),
        };
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

/// Open band `(center - half_width, center + half_width)` where the curve is
/// not drawn, typically around a vertical asymptote or a hole.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionBand {
    pub center: f64,
    pub half_width: f64,
}

impl ExclusionBand {
    /// Band of half-width `eps` around `center`.
    #[must_use]
    pub const fn around(center: f64, eps: f64) -> Self {
        Self {
            center,
            half_width: eps,
        }
    }

    /// Whether `x` lies strictly inside the band.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (x - self.center).abs() < self.half_width
    }
}

/// Per-plot sampling configuration.
///
/// Clip thresholds and exclusion bands differ between functions (an
/// exponential needs a different clip than a simple rational), so they are
/// set per curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleOptions {
    pub sampling: Sampling,
    /// Samples with `|y|` above this are excluded.
    pub clip: Option<f64>,
    pub bands: Vec<ExclusionBand>,
    /// Samples whose display point lies more than this many pixels outside
    /// the viewport are excluded.
    pub display_margin: Option<f64>,
}

impl SampleOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sample `n` uniform intervals.
    #[must_use]
    pub fn count(self, n: usize) -> Self {
        self.sampling(Sampling::Count(n))
    }

    /// Sample with a fixed domain step.
    #[must_use]
    pub fn step(self, dx: f64) -> Self {
        self.sampling(Sampling::Step(dx))
    }

    /// Exclude samples with `|y| > limit`.
    #[must_use]
    pub fn clip(mut self, limit: f64) -> Self {
        self.clip = Some(limit);
        self
    }

    /// Add an exclusion band.
    #[must_use]
    pub fn exclude(mut self, band: ExclusionBand) -> Self {
        self.bands.push(band);
        self
    }

    #[must_use]
    pub fn display_margin(mut self, margin: f64) -> Self {
        self.display_margin = Some(margin);
        self
    }

    fn in_band(&self, x: f64) -> bool {
        self.bands.iter().any(|band| band.contains(x))
    }

    fn clipped(&self, y: f64) -> bool {
        self.clip.is_some_and(|limit| y.abs() > limit)
    }

    fn off_display(&self, p: Point, config: &PlotConfig) -> bool {
        self.display_margin.is_some_and(|margin| {
            p.x < -margin
                || p.x > config.pixel_width() + margin
                || p.y < -margin
                || p.y > config.pixel_height() + margin
        })
    }
}

/// A kept sample in both coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub math: Point,
    pub display: Point,
}

/// A connected run of kept samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    pub points: Vec<SamplePoint>,
}

impl Segment {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest mathematical `x` in the segment.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.math.x, last.math.x))
    }
}

/// Sampled curve: disconnected segments in increasing `x` order. Never
/// contains an empty segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveSample {
    segments: Vec<Segment>,
}

impl CurveSample {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total kept samples across all segments.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every kept sample in order.
    pub fn points(&self) -> impl Iterator<Item = &SamplePoint> {
        self.segments.iter().flat_map(|segment| segment.points.iter())
    }

    /// Drawing commands: a move to the first point of each segment, then a
    /// line to each following point.
    pub fn commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
        self.segments.iter().flat_map(|segment| {
            segment.points.iter().enumerate().map(|(i, p)| {
                if i == 0 {
                    PathCommand::MoveTo(p.display)
                } else {
                    PathCommand::LineTo(p.display)
                }
            })
        })
    }

    /// SVG path data for the whole curve.
    #[must_use]
    pub fn to_path_data(&self) -> String {
        let commands: Vec<PathCommand> = self.commands().collect();
        path_data(&commands)
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Sample `f` over `[start, end]`.
pub fn sample_curve<F>(
    f: F,
    start: f64,
    end: f64,
    config: &PlotConfig,
    options: &SampleOptions,
) -> CurveSample
where
    F: Fn(f64) -> f64,
{
    sample_curve_excluding(f, start, end, config, options, |_| false)
}

/// Sample `f` over `[start, end]`, also excluding every `x` for which
/// `exclude_if` holds. `f` is never called for such `x`.
pub fn sample_curve_excluding<F, E>(
    f: F,
    start: f64,
    end: f64,
    config: &PlotConfig,
    options: &SampleOptions,
    exclude_if: E,
) -> CurveSample
where
    F: Fn(f64) -> f64,
    E: Fn(f64) -> bool,
{
    let abscissae = options.sampling.abscissae(start, end);

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "sample_curve",
        start,
        end,
        samples = abscissae.size_hint().0
    )
    .entered();

    let mut segments = Vec::new();
    let mut current = Vec::new();

    for x in abscissae {
        match keep_sample(&f, x, config, options, &exclude_if) {
            Some(point) => current.push(point),
            None => {
                if !current.is_empty() {
                    segments.push(Segment {
                        points: core::mem::take(&mut current),
                    });
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(Segment { points: current });
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(segments = segments.len(), "curve sampled");

    CurveSample { segments }
}

fn keep_sample<F, E>(
    f: &F,
    x: f64,
    config: &PlotConfig,
    options: &SampleOptions,
    exclude_if: &E,
) -> Option<SamplePoint>
where
    F: Fn(f64) -> f64,
    E: Fn(f64) -> bool,
{
    if !x.is_finite() || options.in_band(x) || exclude_if(x) {
        return None;
    }
    let y = f(x);
    if !y.is_finite() || options.clipped(y) {
        return None;
    }
    let display = to_display(x, y, config);
    if options.off_display(display, config) {
        return None;
    }
    Some(SamplePoint {
        math: Point::new(x, y),
        display,
    })
}

/// Sample each interval as its own curve, e.g. one per branch of a
/// rational function.
pub fn sample_pieces<F>(
    f: F,
    intervals: &[(f64, f64)],
    config: &PlotConfig,
    options: &SampleOptions,
) -> Vec<CurveSample>
where
    F: Fn(f64) -> f64,
{
    intervals
        .iter()
        .map(|&(start, end)| sample_curve(&f, start, end, config, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn lesson_plot() -> PlotConfig {
        PlotConfig::new(-10.0, 10.0, -8.0, 8.0, 600.0, 260.0).expect("valid")
    }

    fn xs(curve: &CurveSample) -> Vec<f64> {
        curve.points().map(|p| p.math.x).collect()
    }

    #[test]
    fn count_sampling_includes_both_ends() {
        let curve = sample_curve(|x| x, -10.0, 10.0, &lesson_plot(), &SampleOptions::default());
        assert_eq!(curve.segment_count(), 1);
        assert_eq!(curve.point_count(), DEFAULT_SAMPLE_COUNT + 1);
        let xs = xs(&curve);
        assert_eq!(xs.first().copied(), Some(-10.0));
        assert_eq!(xs.last().copied(), Some(10.0));
    }

    #[test]
    fn zero_count_is_treated_as_one() {
        let options = SampleOptions::new().count(0);
        let curve = sample_curve(|x| x, 0.0, 4.0, &lesson_plot(), &options);
        assert_eq!(xs(&curve), vec![0.0, 4.0]);
    }

    #[test]
    fn step_sampling_reaches_end_without_drift() {
        let options = SampleOptions::new().step(0.02);
        let curve = sample_curve(|x| x, 0.0, 1.0, &lesson_plot(), &options);
        assert_eq!(curve.point_count(), 51);
        let last = xs(&curve).last().copied().expect("samples");
        assert!((last - 1.0).abs() < 1e-12);
    }

    #[test]
    fn step_past_sample_cap_still_reaches_end() {
        let options = SampleOptions::new().step(1e-6);
        let curve = sample_curve(|_| 0.0, -10.0, 10.0, &lesson_plot(), &options);
        let xs = xs(&curve);
        assert_eq!(xs.len(), MAX_SAMPLES);
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[xs.len() - 1], 10.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn invalid_step_yields_empty_sample() {
        for dx in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let options = SampleOptions::new().step(dx);
            let curve = sample_curve(|x| x, 0.0, 1.0, &lesson_plot(), &options);
            assert!(curve.is_empty());
        }
    }

    #[test]
    fn reversed_or_non_finite_interval_yields_empty_sample() {
        let config = lesson_plot();
        let options = SampleOptions::default();
        assert!(sample_curve(|x| x, 1.0, -1.0, &config, &options).is_empty());
        assert!(sample_curve(|x| x, f64::NEG_INFINITY, 1.0, &config, &options).is_empty());
    }

    #[test]
    fn degenerate_interval_gives_one_point() {
        let curve = sample_curve(|x| x, 2.0, 2.0, &lesson_plot(), &SampleOptions::default());
        assert_eq!(xs(&curve), vec![2.0]);
    }

    #[test]
    fn non_finite_values_break_the_curve() {
        // 0/0 at x = 0 is NaN.
        let options = SampleOptions::new().count(4);
        let curve = sample_curve(|x| x / x, -2.0, 2.0, &lesson_plot(), &options);
        assert_eq!(curve.segment_count(), 2);
        assert_eq!(xs(&curve), vec![-2.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn clip_breaks_on_blow_up() {
        let options = SampleOptions::new().count(4).clip(5.0);
        let curve = sample_curve(|x| x.powi(3), -2.0, 2.0, &lesson_plot(), &options);
        assert_eq!(xs(&curve), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn band_skips_evaluation() {
        let calls = Cell::new(0usize);
        let options = SampleOptions::new()
            .count(4)
            .exclude(ExclusionBand::around(0.0, 0.5));
        let curve = sample_curve(
            |x| {
                calls.set(calls.get() + 1);
                x
            },
            -2.0,
            2.0,
            &lesson_plot(),
            &options,
        );
        assert_eq!(calls.get(), 4);
        assert_eq!(curve.segment_count(), 2);
    }

    #[test]
    fn band_is_open() {
        let band = ExclusionBand::around(3.0, 0.5);
        assert!(band.contains(3.4));
        assert!(!band.contains(3.5));
        assert!(!band.contains(2.5));
    }

    #[test]
    fn predicate_excludes_holes() {
        let options = SampleOptions::new().count(8);
        let curve = sample_curve_excluding(
            |x| x + 1.0,
            -2.0,
            2.0,
            &lesson_plot(),
            &options,
            |x| x == 1.0,
        );
        assert_eq!(curve.segment_count(), 2);
        assert!(!xs(&curve).contains(&1.0));
    }

    #[test]
    fn display_margin_drops_far_off_screen_points() {
        let options = SampleOptions::new().count(4).display_margin(10.0);
        // y = 10 maps to about 32.5px above the top edge.
        let curve = sample_curve(|x| 5.0 * x, -2.0, 2.0, &lesson_plot(), &options);
        assert_eq!(xs(&curve), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn commands_move_at_each_segment_start() {
        let options = SampleOptions::new().count(4);
        let curve = sample_curve(|x| 1.0 / x, -2.0, 2.0, &lesson_plot(), &options);
        let moves = curve
            .commands()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, curve.segment_count());
        assert!(curve.to_path_data().starts_with("M 240.00 "));
    }

    #[test]
    fn pieces_are_sampled_independently() {
        let config = lesson_plot();
        let options = SampleOptions::new().count(10);
        let pieces = sample_pieces(|x| 1.0 / (x - 3.0), &[(-10.0, 2.9), (3.1, 10.0)], &config, &options);
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_eq!(piece.segment_count(), 1);
            assert_eq!(piece.point_count(), 11);
        }
    }

    #[test]
    fn segment_extent() {
        let curve = sample_curve(|x| x, 0.0, 2.0, &lesson_plot(), &SampleOptions::new().count(2));
        assert_eq!(curve.segments()[0].x_extent(), Some((0.0, 2.0)));
    }
}
