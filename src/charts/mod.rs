//! Chart drawers and their shared placement contract.
//!
//! Each drawer takes a [`ChartRegion`] (or a centre point and radius for the
//! pie chart) and a slice of the analytics series, computes its geometry as
//! plain data, and paints it through [`crate::surface::Surface`].  Geometry
//! computation is kept in free functions so the degenerate-data rules can be
//! tested without a PDF document.

pub mod bar;
pub mod line;
pub mod pie;

use crate::surface::{FontRole, Rgb8, Surface};

/// Fixed series colors, keyed by role rather than position so the same
/// series keeps its hue across every chart that shows it.
pub const EXPERIMENTS_COLOR: Rgb8 = Rgb8::new(59, 130, 246);
pub const REPORTS_COLOR: Rgb8 = Rgb8::new(16, 185, 129);
pub const TASKS_COLOR: Rgb8 = Rgb8::new(245, 158, 11);
pub const PRODUCTIVITY_COLOR: Rgb8 = Rgb8::new(139, 92, 246);

/// Palette for pie slices, indexed by slice order and cycled when there are
/// more slices than entries.
pub const PIE_PALETTE: [Rgb8; 4] = [
    Rgb8::new(34, 197, 94),
    Rgb8::new(59, 130, 246),
    Rgb8::new(245, 158, 11),
    Rgb8::new(239, 68, 68),
];

pub(crate) const BORDER_COLOR: Rgb8 = Rgb8::new(200, 200, 200);
pub(crate) const GRID_COLOR: Rgb8 = Rgb8::new(240, 240, 240);
pub(crate) const AXIS_COLOR: Rgb8 = Rgb8::new(150, 150, 150);
pub(crate) const TEXT_COLOR: Rgb8 = Rgb8::new(0, 0, 0);

pub(crate) const TITLE_SIZE: f64 = 12.0;
pub(crate) const LABEL_SIZE: f64 = 8.0;
pub(crate) const PLACEHOLDER_SIZE: f64 = 10.0;

/// Number of gridline intervals drawn inside every plot area.
pub(crate) const GRID_INTERVALS: u32 = 4;

/// Placement contract handed to a chart drawer: the bounding rectangle and
/// the chart title.  Width and height must be strictly positive; drawers
/// scale their content to fit.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title: String,
}

impl ChartRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64, title: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            title: title.into(),
        }
    }
}

/// Draws the title above the region and the light border around it.
pub(crate) fn draw_frame(surface: &Surface, region: &ChartRegion) {
    surface.text(
        &region.title,
        TITLE_SIZE,
        region.x,
        region.y - 5.0,
        FontRole::Bold,
        TEXT_COLOR,
    );
    surface.stroke_rect(region.x, region.y, region.width, region.height, BORDER_COLOR);
}

/// Centered "no data" text for empty or all-zero series.
pub(crate) fn draw_placeholder(surface: &Surface, region: &ChartRegion) {
    surface.text(
        "No data available",
        PLACEHOLDER_SIZE,
        region.x + region.width / 2.0 - 20.0,
        region.y + region.height / 2.0,
        FontRole::Regular,
        TEXT_COLOR,
    );
}

/// Gridlines at equal intervals plus the left and bottom axis lines.
pub(crate) fn draw_grid_and_axes(
    surface: &Surface,
    plot_left: f64,
    plot_top: f64,
    plot_width: f64,
    plot_height: f64,
) {
    for i in 0..=GRID_INTERVALS {
        let y = plot_top + plot_height * i as f64 / GRID_INTERVALS as f64;
        surface.line(plot_left, y, plot_left + plot_width, y, 0.2, GRID_COLOR);
    }
    let bottom = plot_top + plot_height;
    surface.line(plot_left, plot_top, plot_left, bottom, 0.4, AXIS_COLOR);
    surface.line(plot_left, bottom, plot_left + plot_width, bottom, 0.4, AXIS_COLOR);
}
