//! Document assembly: sequences branding, metrics, charts, textual
//! summaries, insights, and the footer pass into one PDF artifact.
//!
//! Assembly is synchronous and self-contained; every call builds its own
//! surface and cursor, so concurrent exports never share state.  The bytes
//! are produced fully in memory and only written to disk on success, so no
//! partial artifact is ever exposed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::charts::{bar, line, pie, ChartRegion};
use crate::error::{RenderError, Result};
use crate::layout::{PageSpec, Paginator};
use crate::model::{percentage_of, AnalyticsPayload};
use crate::providers::{BrandingProvider, IdentityProvider};
use crate::surface::{FontRole, Rgb8, Surface};

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "LABORATORY ANALYTICS REPORT";

const TITLE_SIZE: f64 = 18.0;
const SECTION_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;
const META_SIZE: f64 = 10.0;
const INSIGHT_SIZE: f64 = 11.0;
const FOOTER_SIZE: f64 = 7.0;

const BODY_LINE: f64 = 8.0;
const INSIGHT_LINE: f64 = 6.0;
const SECTION_HEAD: f64 = 15.0;
const SECTION_GAP: f64 = 15.0;

const CHART_HEIGHT: f64 = 60.0;
/// Full footprint of a framed chart: its height plus the title band above
/// and the gap below.
const CHART_FOOTPRINT: f64 = CHART_HEIGHT + 20.0;
const PIE_RADIUS: f64 = 30.0;
/// Band between the cursor and the pie's title baseline.
const PIE_TITLE_BAND: f64 = 10.0;

const TEXT_COLOR: Rgb8 = Rgb8::new(0, 0, 0);
const FOOTER_COLOR: Rgb8 = Rgb8::new(140, 140, 140);
const FOOTER_RULE_COLOR: Rgb8 = Rgb8::new(200, 200, 200);

/// A finished report: the artifact bytes plus its deterministic filename.
#[derive(Debug)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl RenderedReport {
    /// Writes the artifact under its deterministic filename and returns the
    /// full path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Renders analytics payloads into paginated PDF reports.
pub struct ReportRenderer<I, B> {
    identity: I,
    branding: B,
    spec: PageSpec,
}

impl<I: IdentityProvider, B: BrandingProvider> ReportRenderer<I, B> {
    pub fn new(identity: I, branding: B) -> Self {
        Self {
            identity,
            branding,
            spec: PageSpec::A4,
        }
    }

    pub fn with_page_spec(mut self, spec: PageSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Renders the report with the current local time as generation
    /// timestamp.
    pub fn render(&self, payload: &AnalyticsPayload, title: Option<&str>) -> Result<RenderedReport> {
        self.render_at(payload, title, Local::now())
    }

    /// Renders the report with an explicit generation timestamp, which also
    /// dates the filename.  Output is deterministic for a fixed timestamp.
    pub fn render_at(
        &self,
        payload: &AnalyticsPayload,
        title: Option<&str>,
        generated_at: DateTime<Local>,
    ) -> Result<RenderedReport> {
        // Both preconditions are checked before any drawing happens.
        let user = self
            .identity
            .current_user()
            .ok_or(RenderError::NotAuthenticated)?;
        let logo = self.branding.fetch_logo()?;

        let title = title.unwrap_or(DEFAULT_TITLE);
        let spec = self.spec;
        let margin = spec.margin;

        let mut surface = Surface::new(title, spec.width, spec.height)?;
        let mut cursor = Paginator::new(spec);

        debug!("rendering analytics report '{title}' for {user}");

        if let Some(asset) = logo {
            let img = image::load_from_memory(&asset.bytes)?;
            let logo_height = surface.place_image(&img, margin, margin, asset.width_mm);
            cursor.set_y(margin + logo_height + 5.0);
        }

        // Title and generation metadata.
        cursor.advance(8.0);
        surface.text(title, TITLE_SIZE, margin, cursor.y(), FontRole::Bold, TEXT_COLOR);
        cursor.advance(12.0);
        surface.text(
            &format!("Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            META_SIZE,
            margin,
            cursor.y(),
            FontRole::Regular,
            TEXT_COLOR,
        );
        cursor.advance(6.0);
        surface.text(
            &format!("Generated by: {user}"),
            META_SIZE,
            margin,
            cursor.y(),
            FontRole::Regular,
            TEXT_COLOR,
        );
        cursor.advance(20.0);

        self.metrics_section(&mut surface, &mut cursor, payload);
        self.charts_section(&mut surface, &mut cursor, payload);
        self.status_summary_section(&mut surface, &mut cursor, payload);
        self.monthly_summary_section(&mut surface, &mut cursor, payload);
        self.insights_section(&mut surface, &mut cursor, payload);

        self.stamp_footers(&surface, &user, generated_at);

        let page_count = surface.page_count();
        let bytes = surface.save_to_bytes()?;
        let file_name = format!("Analytics_Report_{}.pdf", generated_at.format("%Y-%m-%d"));
        info!(
            "rendered analytics report '{title}': {page_count} page(s), {} bytes",
            bytes.len()
        );

        Ok(RenderedReport {
            file_name,
            bytes,
            page_count,
        })
    }

    fn section_header(
        &self,
        surface: &mut Surface,
        cursor: &mut Paginator,
        text: &str,
        reserve: f64,
    ) {
        cursor.ensure_space(surface, reserve);
        surface.text(
            text,
            SECTION_SIZE,
            self.spec.margin,
            cursor.y(),
            FontRole::Bold,
            TEXT_COLOR,
        );
        cursor.advance(SECTION_HEAD);
    }

    fn body_line(&self, surface: &mut Surface, cursor: &mut Paginator, text: &str) {
        cursor.ensure_space(surface, BODY_LINE);
        surface.text(
            text,
            BODY_SIZE,
            self.spec.margin,
            cursor.y(),
            FontRole::Regular,
            TEXT_COLOR,
        );
        cursor.advance(BODY_LINE);
    }

    fn metrics_section(
        &self,
        surface: &mut Surface,
        cursor: &mut Paginator,
        payload: &AnalyticsPayload,
    ) {
        debug!("emitting key performance metrics");
        self.section_header(surface, cursor, "Key Performance Metrics", 60.0);

        let metrics = [
            ("Total Experiments", payload.total_experiments.to_string()),
            (
                "Completed Experiments",
                payload.completed_experiments.to_string(),
            ),
            ("Tasks Completed", payload.completed_tasks.to_string()),
            ("Total Tasks", payload.total_tasks.to_string()),
            ("Active Projects", payload.total_projects.to_string()),
            (
                "Average Completion Time",
                format!("{} days", payload.avg_completion_time),
            ),
        ];
        for (label, value) in &metrics {
            self.body_line(surface, cursor, &format!("{label}: {value}"));
        }
        cursor.advance(SECTION_GAP);
    }

    fn charts_section(
        &self,
        surface: &mut Surface,
        cursor: &mut Paginator,
        payload: &AnalyticsPayload,
    ) {
        debug!("emitting charts");
        self.section_header(surface, cursor, "Charts & Visualizations", CHART_FOOTPRINT);

        let margin = self.spec.margin;
        let content_width = self.spec.content_width();

        if !payload.monthly_data.is_empty() {
            cursor.ensure_space(surface, CHART_FOOTPRINT);
            let region = ChartRegion::new(
                margin,
                cursor.y(),
                content_width,
                CHART_HEIGHT,
                "Monthly Activity",
            );
            bar::draw(surface, &payload.monthly_data, &region);
            cursor.advance(CHART_FOOTPRINT);
        }

        if !payload.experiment_status_data.is_empty() {
            // The pie's footprint depends on how many legend rows it needs.
            let footprint = PIE_TITLE_BAND
                + PIE_RADIUS * 2.0
                + pie::legend_height(payload.experiment_status_data.len())
                + 10.0;
            cursor.ensure_space(surface, footprint);
            pie::draw(
                surface,
                &payload.experiment_status_data,
                margin + 60.0,
                cursor.y() + PIE_TITLE_BAND + PIE_RADIUS,
                PIE_RADIUS,
                "Experiment Status Distribution",
            );
            cursor.advance(footprint);
        }

        if !payload.productivity_data.is_empty() {
            cursor.ensure_space(surface, CHART_FOOTPRINT);
            let region = ChartRegion::new(
                margin,
                cursor.y(),
                content_width,
                CHART_HEIGHT,
                "Weekly Productivity Trend",
            );
            line::draw(surface, &payload.productivity_data, &region);
            cursor.advance(CHART_FOOTPRINT);
        }
    }

    fn status_summary_section(
        &self,
        surface: &mut Surface,
        cursor: &mut Paginator,
        payload: &AnalyticsPayload,
    ) {
        debug!("emitting status distribution summary");
        self.section_header(surface, cursor, "Experiment Status Distribution", 40.0);

        if payload.experiment_status_data.is_empty() {
            self.body_line(surface, cursor, "No experiment data available");
        } else {
            for status in &payload.experiment_status_data {
                let percentage = percentage_of(status.value, payload.total_experiments);
                self.body_line(
                    surface,
                    cursor,
                    &format!("{}: {} ({percentage}%)", status.name, status.value),
                );
            }
        }
        cursor.advance(SECTION_GAP);
    }

    fn monthly_summary_section(
        &self,
        surface: &mut Surface,
        cursor: &mut Paginator,
        payload: &AnalyticsPayload,
    ) {
        debug!("emitting monthly activity summary");
        self.section_header(surface, cursor, "Monthly Activity Summary", 40.0);

        if payload.monthly_data.is_empty() {
            self.body_line(surface, cursor, "No monthly data available");
        } else {
            for month in &payload.monthly_data {
                self.body_line(
                    surface,
                    cursor,
                    &format!(
                        "{}: {} experiments, {} reports, {} tasks",
                        month.month, month.experiments, month.reports, month.tasks
                    ),
                );
            }
        }
        cursor.advance(SECTION_GAP);
    }

    fn insights_section(
        &self,
        surface: &mut Surface,
        cursor: &mut Paginator,
        payload: &AnalyticsPayload,
    ) {
        debug!("emitting key insights");
        self.section_header(surface, cursor, "Key Insights", 60.0);

        let margin = self.spec.margin;
        let wrap_width = self.spec.content_width() - 10.0;
        for insight in key_insights(payload) {
            cursor.ensure_space(surface, INSIGHT_LINE + 4.0);
            let lines = surface.wrap_text(&format!("\u{2022} {insight}"), INSIGHT_SIZE, wrap_width);
            for line in lines {
                cursor.ensure_space(surface, INSIGHT_LINE);
                surface.text(
                    &line,
                    INSIGHT_SIZE,
                    margin,
                    cursor.y(),
                    FontRole::Regular,
                    TEXT_COLOR,
                );
                cursor.advance(INSIGHT_LINE);
            }
            cursor.advance(4.0);
        }
    }

    /// Stamps the footer on every page once the final page count is known.
    fn stamp_footers(&self, surface: &Surface, user: &str, generated_at: DateTime<Local>) {
        let spec = self.spec;
        let rule_y = spec.height - 18.0;
        let text_y = spec.height - 12.0;
        let total = surface.page_count();
        let attribution = format!(
            "Generated by {user} on {}",
            generated_at.format("%Y-%m-%d")
        );
        for page in 0..total {
            surface.line_on_page(
                page,
                spec.margin,
                rule_y,
                spec.width - spec.margin,
                rule_y,
                0.3,
                FOOTER_RULE_COLOR,
            );
            surface.text_on_page(
                page,
                &attribution,
                FOOTER_SIZE,
                spec.margin,
                text_y,
                FontRole::Regular,
                FOOTER_COLOR,
            );
            let page_text = format!("Page {} of {total}", page + 1);
            let x = spec.width - spec.margin - surface.text_width(&page_text, FOOTER_SIZE);
            surface.text_on_page(
                page,
                &page_text,
                FOOTER_SIZE,
                x,
                text_y,
                FontRole::Regular,
                FOOTER_COLOR,
            );
        }
    }
}

/// The derived-insight sentences, in document order.
pub fn key_insights(payload: &AnalyticsPayload) -> Vec<String> {
    vec![
        format!(
            "Experiment completion rate: {}%",
            payload.experiment_completion_rate()
        ),
        format!("Task completion rate: {}%", payload.task_completion_rate()),
        format!(
            "Active team members: {} working on {} projects",
            payload.active_team_members, payload.total_projects
        ),
        format!(
            "Average experiment completion time: {} days",
            payload.avg_completion_time
        ),
    ]
}
