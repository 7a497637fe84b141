//! Renders a sample analytics report to the current directory.
//!
//! ```sh
//! cargo run --example export_report
//! ```

use std::error::Error;

use lab_analytics_report::model::{
    AnalyticsPayload, MonthlyActivity, ProductivitySample, StatusCount,
};
use lab_analytics_report::providers::{PlaceholderBranding, StaticIdentity};
use lab_analytics_report::report::ReportRenderer;

fn month(month: &str, experiments: u32, reports: u32, tasks: u32) -> MonthlyActivity {
    MonthlyActivity {
        month: month.to_string(),
        experiments,
        reports,
        tasks,
    }
}

fn sample_payload() -> AnalyticsPayload {
    AnalyticsPayload {
        total_experiments: 24,
        completed_experiments: 17,
        total_tasks: 112,
        completed_tasks: 96,
        total_projects: 5,
        active_team_members: 8,
        avg_completion_time: 6.5,
        monthly_data: vec![
            month("Jan", 3, 5, 14),
            month("Feb", 4, 6, 18),
            month("Mar", 2, 4, 12),
            month("Apr", 5, 8, 22),
            month("May", 6, 7, 25),
            month("Jun", 4, 6, 21),
        ],
        experiment_status_data: vec![
            StatusCount {
                name: "Completed".to_string(),
                value: 17,
            },
            StatusCount {
                name: "In Progress".to_string(),
                value: 5,
            },
            StatusCount {
                name: "Planned".to_string(),
                value: 2,
            },
        ],
        productivity_data: (1..=8)
            .map(|week| ProductivitySample {
                week: format!("W{week}"),
                productivity: 60.0 + (week as f64 * 7.0) % 25.0,
            })
            .collect(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let renderer = ReportRenderer::new(
        StaticIdentity("demo@lab.example".to_string()),
        PlaceholderBranding::default(),
    );
    let report = renderer.render(&sample_payload(), None)?;
    let path = report.write_to_dir(".")?;
    println!(
        "Generated {} ({} bytes, {} pages)",
        path.display(),
        report.bytes.len(),
        report.page_count
    );
    Ok(())
}
