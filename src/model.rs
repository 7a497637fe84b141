//! Data structures describing the analytics payload handed to the renderer.
//!
//! The types in this module mirror the JSON produced by the upstream
//! data-aggregation service (hence the camelCase serde renames).  They carry
//! no rendering state; the renderer treats them as read-only input.  All
//! numeric fields are expected to be non-negative and every series may be
//! empty -- the chart drawers degrade to placeholders rather than fail.

use serde::{Deserialize, Serialize};

/// One month of activity counts for the grouped bar chart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// Month label shown on the x axis, e.g. `"Jan"`.
    pub month: String,
    #[serde(default)]
    pub experiments: u32,
    #[serde(default)]
    pub reports: u32,
    #[serde(default)]
    pub tasks: u32,
}

/// One experiment-status bucket for the pie chart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub name: String,
    #[serde(default)]
    pub value: u32,
}

/// One week of productivity for the line chart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivitySample {
    /// Week label shown on the x axis, e.g. `"W1"`.
    pub week: String,
    #[serde(default)]
    pub productivity: f64,
}

/// Aggregated analytics handed to the report renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsPayload {
    pub total_experiments: u32,
    pub completed_experiments: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub total_projects: u32,
    pub active_team_members: u32,
    /// Average experiment completion time in days.
    pub avg_completion_time: f64,
    pub monthly_data: Vec<MonthlyActivity>,
    pub experiment_status_data: Vec<StatusCount>,
    pub productivity_data: Vec<ProductivitySample>,
}

impl AnalyticsPayload {
    /// Completed experiments as a whole percentage, 0 when none were started.
    pub fn experiment_completion_rate(&self) -> u32 {
        completion_rate(self.completed_experiments, self.total_experiments)
    }

    /// Completed tasks as a whole percentage, 0 when none exist.
    pub fn task_completion_rate(&self) -> u32 {
        completion_rate(self.completed_tasks, self.total_tasks)
    }
}

fn completion_rate(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Share of `value` in `total` formatted to one decimal place, `"0"` when the
/// total is zero.  Matches the textual status-distribution lines.
pub fn percentage_of(value: u32, total: u32) -> String {
    if total == 0 {
        "0".to_string()
    } else {
        format!("{:.1}", (value as f64 / total as f64) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_rate_rounds_to_whole_percent() {
        let payload = AnalyticsPayload {
            total_experiments: 10,
            completed_experiments: 3,
            ..Default::default()
        };
        assert_eq!(payload.experiment_completion_rate(), 30);
    }

    #[test]
    fn completion_rate_handles_zero_denominator() {
        let payload = AnalyticsPayload::default();
        assert_eq!(payload.experiment_completion_rate(), 0);
        assert_eq!(payload.task_completion_rate(), 0);
    }

    #[test]
    fn percentage_of_formats_one_decimal() {
        assert_eq!(percentage_of(1, 3), "33.3");
        assert_eq!(percentage_of(5, 5), "100.0");
        assert_eq!(percentage_of(4, 0), "0");
    }

    #[test]
    fn payload_deserializes_from_service_json() {
        let raw = r#"{
            "totalExperiments": 5,
            "completedExperiments": 5,
            "totalProjects": 2,
            "activeTeamMembers": 3,
            "avgCompletionTime": 4.0,
            "monthlyData": [],
            "experimentStatusData": [{"name": "done", "value": 5}],
            "productivityData": [{"week": "W1", "productivity": 10.0}]
        }"#;
        let payload: AnalyticsPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.total_experiments, 5);
        assert_eq!(payload.total_tasks, 0);
        assert_eq!(payload.experiment_status_data[0].name, "done");
        assert_eq!(payload.productivity_data.len(), 1);
    }
}
