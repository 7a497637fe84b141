//! Grouped bar chart: monthly experiments, reports, and tasks.

use crate::model::MonthlyActivity;
use crate::surface::{FontRole, Rgb8, Surface};

use super::{
    draw_frame, draw_grid_and_axes, draw_placeholder, ChartRegion, EXPERIMENTS_COLOR,
    GRID_INTERVALS, LABEL_SIZE, REPORTS_COLOR, TASKS_COLOR, TEXT_COLOR,
};

/// Horizontal inset between the region border and the plot area.
const PLOT_INSET: f64 = 10.0;
/// Vertical space under the plot for category labels.
const LABEL_BAND: f64 = 20.0;
/// Vertical space above the plot kept clear for the legend.
const LEGEND_BAND: f64 = 10.0;
/// Fraction of a group slot taken by one of its three bars.
const BAR_FRACTION: f64 = 0.25;
/// Stride between bar starts within a group, as a fraction of the slot.
const BAR_STEP: f64 = 0.30;

/// One bar resolved to page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb8,
}

/// Largest value across all three series, used as the common scale.
fn max_value(data: &[MonthlyActivity]) -> u32 {
    data.iter()
        .map(|m| m.experiments.max(m.reports).max(m.tasks))
        .max()
        .unwrap_or(0)
}

/// Resolves every non-zero bar to its rectangle.  Must only be called with a
/// non-zero `max`; the drawer short-circuits to a placeholder before that.
fn bar_rects(data: &[MonthlyActivity], region: &ChartRegion, max: u32) -> Vec<BarRect> {
    let plot_height = region.height - LABEL_BAND - LEGEND_BAND;
    let baseline = region.y + region.height - LABEL_BAND;
    let group_width = (region.width - PLOT_INSET * 2.0) / data.len() as f64;
    let bar_width = group_width * BAR_FRACTION;
    // Three bars spaced by BAR_STEP slots, centered inside the group.
    let cluster_width = group_width * (BAR_STEP * 2.0 + BAR_FRACTION);
    let cluster_offset = (group_width - cluster_width) / 2.0;

    let mut rects = Vec::new();
    for (index, month) in data.iter().enumerate() {
        let group_x = region.x + PLOT_INSET + index as f64 * group_width + cluster_offset;
        let series = [
            (month.experiments, EXPERIMENTS_COLOR),
            (month.reports, REPORTS_COLOR),
            (month.tasks, TASKS_COLOR),
        ];
        for (slot, (value, color)) in series.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let height = (*value as f64 / max as f64) * plot_height;
            rects.push(BarRect {
                x: group_x + slot as f64 * BAR_STEP * group_width,
                y: baseline - height,
                width: bar_width,
                height,
                color: *color,
            });
        }
    }
    rects
}

/// Draws the grouped bar chart into `region`.
pub fn draw(surface: &Surface, data: &[MonthlyActivity], region: &ChartRegion) {
    draw_frame(surface, region);

    let max = max_value(data);
    if data.is_empty() || max == 0 {
        draw_placeholder(surface, region);
        return;
    }

    let plot_left = region.x + PLOT_INSET;
    let plot_top = region.y + LEGEND_BAND;
    let plot_width = region.width - PLOT_INSET * 2.0;
    let plot_height = region.height - LABEL_BAND - LEGEND_BAND;

    draw_grid_and_axes(surface, plot_left, plot_top, plot_width, plot_height);

    // Y-axis scale labels at the gridline levels, max down to zero.
    for i in 0..=GRID_INTERVALS {
        let level = ((max as f64) * (GRID_INTERVALS - i) as f64 / GRID_INTERVALS as f64).round();
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

    for bar in bar_rects(data, region, max) {
        surface.fill_rect(bar.x, bar.y, bar.width, bar.height, bar.color);
    }

    // Category labels under each group.
    let group_width = plot_width / data.len() as f64;
    for (index, month) in data.iter().enumerate() {
        let label_width = surface.text_width(&month.month, LABEL_SIZE);
        let center = plot_left + index as f64 * group_width + group_width / 2.0;
        surface.text(
            &month.month,
            LABEL_SIZE,
            center - label_width / 2.0,
            region.y + region.height - 5.0,
            FontRole::Regular,
            TEXT_COLOR,
        );
    }

    draw_legend(surface, region);
}

/// Legend pinned to the top-right corner of the region, clear of the plot.
fn draw_legend(surface: &Surface, region: &ChartRegion) {
    let entries = [
        ("Experiments", EXPERIMENTS_COLOR),
        ("Reports", REPORTS_COLOR),
        ("Tasks", TASKS_COLOR),
    ];
    let x = region.x + region.width - 80.0;
    for (row, (label, color)) in entries.into_iter().enumerate() {
        let y = region.y + 2.0 + row as f64 * 7.0;
        surface.fill_rect(x, y, 8.0, 4.0, color);
        surface.text(label, LABEL_SIZE, x + 15.0, y + 3.5, FontRole::Regular, TEXT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(label: &str, experiments: u32, reports: u32, tasks: u32) -> MonthlyActivity {
        MonthlyActivity {
            month: label.to_string(),
            experiments,
            reports,
            tasks,
        }
    }

    fn region() -> ChartRegion {
        ChartRegion::new(20.0, 100.0, 170.0, 60.0, "Monthly Activity")
    }

    #[test]
    fn max_value_spans_all_three_series() {
        let data = vec![month("Jan", 2, 9, 4), month("Feb", 3, 1, 7)];
        assert_eq!(max_value(&data), 9);
    }

    #[test]
    fn all_zero_series_produce_no_rects() {
        let data = vec![month("Jan", 0, 0, 0)];
        assert_eq!(max_value(&data), 0);
        // draw() never reaches bar_rects for this input; the chart degrades
        // to the placeholder instead of dividing by zero.
    }

    #[test]
    fn bar_heights_are_proportional_and_finite() {
        let data = vec![month("Jan", 5, 10, 0)];
        let rects = bar_rects(&data, &region(), max_value(&data));
        assert_eq!(rects.len(), 2);
        assert!((rects[0].height - rects[1].height / 2.0).abs() < 1e-9);
        for rect in &rects {
            assert!(rect.height.is_finite() && rect.height > 0.0);
            assert!(rect.width > 0.0);
        }
    }

    #[test]
    fn tallest_bar_fills_the_plot_height() {
        let data = vec![month("Jan", 10, 0, 0)];
        let r = region();
        let rects = bar_rects(&data, &r, 10);
        let plot_height = r.height - LABEL_BAND - LEGEND_BAND;
        assert!((rects[0].height - plot_height).abs() < 1e-9);
        assert!((rects[0].y - (r.y + LEGEND_BAND)).abs() < 1e-9);
    }

    #[test]
    fn groups_partition_the_plot_width_evenly() {
        let data = vec![month("Jan", 1, 0, 0), month("Feb", 1, 0, 0), month("Mar", 1, 0, 0)];
        let r = region();
        let rects = bar_rects(&data, &r, 1);
        assert_eq!(rects.len(), 3);
        let step = rects[1].x - rects[0].x;
        assert!((rects[2].x - rects[1].x - step).abs() < 1e-9);
        let group_width = (r.width - PLOT_INSET * 2.0) / 3.0;
        assert!((step - group_width).abs() < 1e-9);
    }

    #[test]
    fn bars_stay_inside_their_region() {
        let data: Vec<_> = (0..12).map(|i| month(&format!("M{i}"), i + 1, 12 - i, 6)).collect();
        let r = region();
        let rects = bar_rects(&data, &r, max_value(&data));
        for rect in &rects {
            assert!(rect.x >= r.x);
            assert!(rect.x + rect.width <= r.x + r.width + 1e-9);
            assert!(rect.y >= r.y);
            assert!(rect.y + rect.height <= r.y + r.height + 1e-9);
        }
    }
}
