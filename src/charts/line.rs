//! Line chart: weekly productivity trend.

use crate::model::ProductivitySample;
use crate::surface::{FontRole, Surface};

use super::{
    draw_frame, draw_grid_and_axes, draw_placeholder, ChartRegion, GRID_INTERVALS, LABEL_SIZE,
    PRODUCTIVITY_COLOR, TEXT_COLOR,
};

const PLOT_INSET: f64 = 10.0;
const LABEL_BAND: f64 = 20.0;
const TOP_INSET: f64 = 10.0;
/// Radius of the filled marker over every data point.
const MARKER_RADIUS: f64 = 1.5;

/// Vertical scale of the series.  A flat or single-point series gets a
/// substitute range of 1 so positions stay finite, and its values map to the
/// middle of the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ValueScale {
    pub min: f64,
    pub range: f64,
    flat: bool,
}

impl ValueScale {
    /// Position of `value` in the 0..=1 plot band, 0 at the bottom.
    pub fn normalized(&self, value: f64) -> f64 {
        if self.flat {
            0.5
        } else {
            (value - self.min) / self.range
        }
    }
}

pub(crate) fn value_scale(data: &[ProductivitySample]) -> ValueScale {
    let min = data.iter().map(|s| s.productivity).fold(f64::INFINITY, f64::min);
    let max = data
        .iter()
        .map(|s| s.productivity)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let flat = range == 0.0;
    ValueScale {
        min,
        range: if flat { 1.0 } else { range },
        flat,
    }
}

/// Resolves every sample to page coordinates.  A single point sits at the
/// plot's left edge with a zero horizontal step; the flat-range fallback in
/// [`value_scale`] keeps its vertical position finite.
pub(crate) fn point_positions(data: &[ProductivitySample], region: &ChartRegion) -> Vec<(f64, f64)> {
    let plot_width = region.width - PLOT_INSET * 2.0;
    let plot_height = region.height - LABEL_BAND - TOP_INSET;
    let plot_bottom = region.y + region.height - LABEL_BAND;
    let scale = value_scale(data);
    let step = if data.len() > 1 {
        plot_width / (data.len() - 1) as f64
    } else {
        0.0
    };
    data.iter()
        .enumerate()
        .map(|(i, sample)| {
            let x = region.x + PLOT_INSET + i as f64 * step;
            let y = plot_bottom - scale.normalized(sample.productivity) * plot_height;
            (x, y)
        })
        .collect()
}

/// Draws the line chart into `region`.
pub fn draw(surface: &Surface, data: &[ProductivitySample], region: &ChartRegion) {
    draw_frame(surface, region);

    if data.is_empty() {
        draw_placeholder(surface, region);
        return;
    }

    let plot_left = region.x + PLOT_INSET;
    let plot_top = region.y + TOP_INSET;
    let plot_width = region.width - PLOT_INSET * 2.0;
    let plot_height = region.height - LABEL_BAND - TOP_INSET;

    draw_grid_and_axes(surface, plot_left, plot_top, plot_width, plot_height);

    // Y-axis labels at the gridline levels, top of the range down to min.
    let scale = value_scale(data);
    for i in 0..=GRID_INTERVALS {
        let level =
            (scale.min + scale.range * (GRID_INTERVALS - i) as f64 / GRID_INTERVALS as f64).round();
        let y = plot_top + plot_height * i as f64 / GRID_INTERVALS as f64;
        surface.text(
            &format!("{level}"),
            LABEL_SIZE,
            region.x + 1.0,
            y + 1.0,
            FontRole::Regular,
            TEXT_COLOR,
        );
    }

    let points = point_positions(data, region);
    surface.polyline(&points, 0.7, PRODUCTIVITY_COLOR);
    for &(x, y) in &points {
        surface.fill_circle(x, y, MARKER_RADIUS, PRODUCTIVITY_COLOR);
    }

    for (sample, &(x, _)) in data.iter().zip(&points) {
        let label_width = surface.text_width(&sample.week, LABEL_SIZE);
        surface.text(
            &sample.week,
            LABEL_SIZE,
            x - label_width / 2.0,
            region.y + region.height - 5.0,
            FontRole::Regular,
            TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(week: &str, productivity: f64) -> ProductivitySample {
        ProductivitySample {
            week: week.to_string(),
            productivity,
        }
    }

    fn region() -> ChartRegion {
        ChartRegion::new(20.0, 120.0, 170.0, 60.0, "Weekly Productivity Trend")
    }

    #[test]
    fn single_point_lands_on_the_left_edge_vertically_centred() {
        let r = region();
        let points = point_positions(&[sample("W1", 10.0)], &r);
        assert_eq!(points.len(), 1);
        let (x, y) = points[0];
        assert!((x - (r.x + PLOT_INSET)).abs() < 1e-9);
        let plot_height = r.height - LABEL_BAND - TOP_INSET;
        let mid = r.y + r.height - LABEL_BAND - plot_height / 2.0;
        assert!((y - mid).abs() < 1e-9);
    }

    #[test]
    fn flat_series_substitutes_a_unit_range() {
        let scale = value_scale(&[sample("W1", 4.0), sample("W2", 4.0)]);
        assert_eq!(scale.range, 1.0);
        assert_eq!(scale.normalized(4.0), 0.5);
        let points = point_positions(&[sample("W1", 4.0), sample("W2", 4.0)], &region());
        assert!(points.iter().all(|p| p.1.is_finite()));
        assert!((points[0].1 - points[1].1).abs() < 1e-9);
    }

    #[test]
    fn points_are_evenly_spaced() {
        let data = vec![sample("W1", 1.0), sample("W2", 5.0), sample("W3", 3.0)];
        let points = point_positions(&data, &region());
        let step = points[1].0 - points[0].0;
        assert!((points[2].0 - points[1].0 - step).abs() < 1e-9);
        let plot_width = region().width - PLOT_INSET * 2.0;
        assert!((step - plot_width / 2.0).abs() < 1e-9);
    }

    #[test]
    fn extremes_touch_the_plot_edges() {
        let data = vec![sample("W1", 2.0), sample("W2", 8.0)];
        let r = region();
        let points = point_positions(&data, &r);
        let plot_bottom = r.y + r.height - LABEL_BAND;
        let plot_top = r.y + TOP_INSET;
        assert!((points[0].1 - plot_bottom).abs() < 1e-9);
        assert!((points[1].1 - plot_top).abs() < 1e-9);
    }
}
