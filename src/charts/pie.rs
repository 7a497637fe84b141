//! Pie chart: experiment status distribution, drawn as triangle fans.
//!
//! Slices start at the top of the circle and proceed clockwise, accumulating
//! the running angle exactly so the fan closes to a full circle.  Each slice
//! is approximated by triangles sampled along its arc; the sample count grows
//! with the slice's angular size so large slices stay smooth while tiny
//! slices still get a minimum fan.  The backend offers true arcs only through
//! bezier helpers, and the fan keeps the geometry trivially fillable.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::model::StatusCount;
use crate::surface::{FontRole, Rgb8, Surface};

use super::{LABEL_SIZE, PIE_PALETTE, PLACEHOLDER_SIZE, TEXT_COLOR, TITLE_SIZE};

/// Angle at the top of the circle where the first slice begins.
const START_ANGLE: f64 = -FRAC_PI_2;
/// Minimum triangles per slice.
const MIN_STEPS: usize = 3;
/// Triangles per radian of slice angle.
const STEPS_PER_RADIAN: f64 = 10.0;
/// Vertical gap between the circle and the first legend row.
const LEGEND_GAP: f64 = 15.0;
/// Height of one legend row.
const LEGEND_ROW: f64 = 8.0;

/// Angular size of every slice, in slice order.  Empty when the total is
/// zero so no caller can divide by it.
pub(crate) fn slice_angles(data: &[StatusCount]) -> Vec<f64> {
    let total: u64 = data.iter().map(|s| s.value as u64).sum();
    if total == 0 {
        return Vec::new();
    }
    data.iter()
        .map(|s| (s.value as f64 / total as f64) * TAU)
        .collect()
}

pub(crate) fn sample_count(angle: f64) -> usize {
    MIN_STEPS.max((angle * STEPS_PER_RADIAN).floor() as usize)
}

/// Palette color for the slice at `index`, cycling past the palette end.
pub fn slice_color(index: usize) -> Rgb8 {
    PIE_PALETTE[index % PIE_PALETTE.len()]
}

/// Total height of the chart's legend for `count` items.
pub fn legend_height(count: usize) -> f64 {
    LEGEND_GAP + count as f64 * LEGEND_ROW
}

/// Draws the pie chart centred on `(cx, cy)` with the given radius, followed
/// by its legend below the circle.
pub fn draw(surface: &Surface, data: &[StatusCount], cx: f64, cy: f64, radius: f64, title: &str) {
    surface.text(
        title,
        TITLE_SIZE,
        cx - 30.0,
        cy - radius - 10.0,
        FontRole::Bold,
        TEXT_COLOR,
    );

    let angles = slice_angles(data);
    if angles.is_empty() {
        surface.text(
            "No data available",
            PLACEHOLDER_SIZE,
            cx - 20.0,
            cy,
            FontRole::Regular,
            TEXT_COLOR,
        );
        return;
    }

    let white = Rgb8::new(255, 255, 255);
    let mut current = START_ANGLE;
    for (index, &slice) in angles.iter().enumerate() {
        let color = slice_color(index);
        let steps = sample_count(slice);
        let step = slice / steps as f64;
        for i in 0..steps {
            let a1 = current + i as f64 * step;
            let a2 = current + (i + 1) as f64 * step;
            // Page y grows downward, so increasing angles sweep clockwise.
            let p1 = (cx + a1.cos() * radius, cy + a1.sin() * radius);
            let p2 = (cx + a2.cos() * radius, cy + a2.sin() * radius);
            surface.fill_triangle((cx, cy), p1, p2, color, white);
        }
        current += slice;
    }

    draw_legend(surface, data, cx, cy, radius);
}

/// One legend row per slice: swatch, name, raw value, percentage of total.
fn draw_legend(surface: &Surface, data: &[StatusCount], cx: f64, cy: f64, radius: f64) {
    let total: u64 = data.iter().map(|s| s.value as u64).sum();
    for (index, item) in data.iter().enumerate() {
        let y = cy + radius + LEGEND_GAP + index as f64 * LEGEND_ROW;
        surface.fill_rect(cx - 40.0, y - 3.0, 6.0, 4.0, slice_color(index));
        let percentage = (item.value as f64 / total as f64) * 100.0;
        surface.text(
            &format!("{}: {} ({:.1}%)", item.name, item.value, percentage),
            LABEL_SIZE,
            cx - 30.0,
            y,
            FontRole::Regular,
            TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, value: u32) -> StatusCount {
        StatusCount {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn slice_angles_sum_to_full_circle() {
        let data = vec![status("done", 7), status("running", 2), status("blocked", 1)];
        let angles = slice_angles(&data);
        let sum: f64 = angles.iter().sum();
        assert!((sum - TAU).abs() < 1e-6);
    }

    #[test]
    fn single_slice_covers_everything() {
        let angles = slice_angles(&[status("done", 5)]);
        assert_eq!(angles.len(), 1);
        assert!((angles[0] - TAU).abs() < 1e-9);
    }

    #[test]
    fn zero_total_yields_no_slices() {
        assert!(slice_angles(&[]).is_empty());
        assert!(slice_angles(&[status("done", 0), status("failed", 0)]).is_empty());
    }

    #[test]
    fn legend_percentages_sum_to_one_hundred() {
        let data = vec![status("a", 1), status("b", 1), status("c", 1)];
        let total: u64 = data.iter().map(|s| s.value as u64).sum();
        let sum: f64 = data
            .iter()
            .map(|s| {
                let raw = (s.value as f64 / total as f64) * 100.0;
                // One-decimal rounding, as shown in the legend rows.
                (raw * 10.0).round() / 10.0
            })
            .sum();
        assert!((sum - 100.0).abs() < 0.2);
    }

    #[test]
    fn sampling_density_scales_with_angle() {
        assert_eq!(sample_count(0.01), MIN_STEPS);
        assert_eq!(sample_count(1.0), 10);
        assert!(sample_count(TAU) > sample_count(1.0));
    }

    #[test]
    fn palette_cycles_past_its_length() {
        assert_eq!(slice_color(0), slice_color(PIE_PALETTE.len()));
        assert_eq!(slice_color(1), slice_color(PIE_PALETTE.len() + 1));
    }
}
