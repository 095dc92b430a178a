#![forbid(unsafe_code)]

//! Writing plot geometry into a page's visual sink.

use stepwise_core::VisualSink;
use stepwise_plot::{
    CurveSample, DisplayLine, GridLine, Orientation, PlotConfig, asymptote_label_anchor,
    place_axis_aligned_line,
};

/// Replace element `id`'s path with the sampled curve.
pub fn draw_curve(sink: &mut impl VisualSink, id: &str, curve: &CurveSample) {
    sink.set_path(id, &curve.to_path_data());
}

/// Replace element `id`'s geometry with the line's two endpoints.
pub fn draw_line(sink: &mut impl VisualSink, id: &str, line: &DisplayLine) {
    sink.set_geometry(id, &line.endpoints());
}

/// Place an asymptote line and its label, returning the line.
///
/// The label element receives a single anchor point as its geometry and
/// `text` as its content.
pub fn draw_asymptote(
    sink: &mut impl VisualSink,
    line_id: &str,
    label_id: &str,
    orientation: Orientation,
    value: f64,
    text: &str,
    config: &PlotConfig,
) -> DisplayLine {
    let line = place_axis_aligned_line(orientation, value, config);
    draw_line(sink, line_id, &line);
    let anchor = asymptote_label_anchor(orientation, value, config);
    sink.set_geometry(label_id, &[anchor.to_tuple()]);
    sink.set_text(label_id, text);
    line
}

/// Write grid lines as `{prefix}-major-{n}` and `{prefix}-minor-{n}`
/// elements, numbered separately per kind.
pub fn draw_grid(sink: &mut impl VisualSink, prefix: &str, lines: &[GridLine]) {
    let (mut major, mut minor) = (0usize, 0usize);
    for grid_line in lines {
        let id = if grid_line.major {
            major += 1;
            format!("{prefix}-major-{major}")
        } else {
            minor += 1;
            format!("{prefix}-minor-{minor}")
        };
        draw_line(sink, &id, &grid_line.line);
    }
}
