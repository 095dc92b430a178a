#![forbid(unsafe_code)]

//! Property-based invariant tests for coordinate mapping and sampling.
//!
//! 1. `to_math` inverts `to_display` for any point.
//! 2. `to_display` is monotone: increasing in `x`, decreasing in `y`.
//! 3. The window corners land on the viewport corners.
//! 4. Sampling is deterministic.
//! 5. No kept sample lies in an exclusion band or above the clip.
//! 6. Every segment is non-empty and segments are ordered by `x`.

use proptest::prelude::*;
use stepwise_plot::{ExclusionBand, PlotConfig, SampleOptions, sample_curve, to_display, to_math};

// ── Helpers ─────────────────────────────────────────────────────────────

fn config_strategy() -> impl Strategy<Value = PlotConfig> {
    (
        -100.0f64..100.0,
        0.5f64..200.0,
        -100.0f64..100.0,
        0.5f64..200.0,
        10.0f64..2000.0,
        10.0f64..2000.0,
    )
        .prop_map(|(dmin, dspan, rmin, rspan, w, h)| {
            PlotConfig::new(dmin, dmin + dspan, rmin, rmin + rspan, w, h).expect("valid extents")
        })
}

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale.max(1.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Inverse mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn to_math_inverts_to_display(
        config in config_strategy(),
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
    ) {
        let p = to_display(x, y, &config);
        let back = to_math(p.x, p.y, &config);
        let scale = x.abs().max(y.abs()).max(config.domain_span()).max(config.range_span());
        prop_assert!(close(back.x, x, scale), "x: {} vs {}", back.x, x);
        prop_assert!(close(back.y, y, scale), "y: {} vs {}", back.y, y);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn display_x_increases_with_math_x(
        config in config_strategy(),
        x in -500.0f64..500.0,
        dx in 0.01f64..100.0,
        y in -500.0f64..500.0,
    ) {
        let a = to_display(x, y, &config);
        let b = to_display(x + dx, y, &config);
        prop_assert!(b.x > a.x);
        prop_assert_eq!(a.y, b.y);
    }

    #[test]
    fn display_y_decreases_with_math_y(
        config in config_strategy(),
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        dy in 0.01f64..100.0,
    ) {
        let a = to_display(x, y, &config);
        let b = to_display(x, y + dy, &config);
        prop_assert!(b.y < a.y);
        prop_assert_eq!(a.x, b.x);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Corners
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn window_corners_map_to_viewport_corners(config in config_strategy()) {
        let top_left = to_display(config.domain_min(), config.range_max(), &config);
        let bottom_right = to_display(config.domain_max(), config.range_min(), &config);
        prop_assert!(close(top_left.x, 0.0, config.pixel_width()));
        prop_assert!(close(top_left.y, 0.0, config.pixel_height()));
        prop_assert!(close(bottom_right.x, config.pixel_width(), config.pixel_width()));
        prop_assert!(close(bottom_right.y, config.pixel_height(), config.pixel_height()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–6. Sampling
// ═════════════════════════════════════════════════════════════════════════

fn options_strategy() -> impl Strategy<Value = SampleOptions> {
    (
        1usize..400,
        prop::option::of(1.0f64..1e4),
        prop::collection::vec((-10.0f64..10.0, 0.01f64..1.0), 0..4),
    )
        .prop_map(|(count, clip, bands)| {
            let mut options = SampleOptions::new().count(count);
            if let Some(clip) = clip {
                options = options.clip(clip);
            }
            for (center, eps) in bands {
                options = options.exclude(ExclusionBand::around(center, eps));
            }
            options
        })
}

fn rational(x: f64) -> f64 {
    (2.0 * x + 1.0) / ((x - 3.0) * (x + 2.0))
}

proptest! {
    #[test]
    fn sampling_is_deterministic(config in config_strategy(), options in options_strategy()) {
        let first = sample_curve(rational, -10.0, 10.0, &config, &options);
        let second = sample_curve(rational, -10.0, 10.0, &config, &options);
        prop_assert_eq!(first.to_path_data(), second.to_path_data());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn kept_samples_respect_bands_and_clip(
        config in config_strategy(),
        options in options_strategy(),
    ) {
        let curve = sample_curve(rational, -10.0, 10.0, &config, &options);
        for point in curve.points() {
            let x = point.math.x;
            for band in &options.bands {
                prop_assert!(!band.contains(x), "x = {} inside {:?}", x, band);
            }
            if let Some(clip) = options.clip {
                prop_assert!(point.math.y.abs() <= clip);
            }
            prop_assert!(point.math.y.is_finite());
        }
    }

    #[test]
    fn segments_are_non_empty_and_ordered(
        config in config_strategy(),
        options in options_strategy(),
    ) {
        let curve = sample_curve(rational, -10.0, 10.0, &config, &options);
        let mut previous = f64::NEG_INFINITY;
        for segment in curve.segments() {
            prop_assert!(!segment.is_empty());
            for point in &segment.points {
                prop_assert!(point.math.x > previous);
                previous = point.math.x;
            }
        }
    }
}
