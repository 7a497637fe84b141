//! Paginated PDF analytics reports for laboratory management data.
//!
//! The crate receives an [`model::AnalyticsPayload`] from an external
//! aggregation service and renders it into a multi-page PDF document: a
//! metrics summary, a grouped bar chart, a pie chart, a line chart, textual
//! mirrors of each chart, and a derived-insights section, with a footer
//! stamped on every page.  Rendering is driven by [`report::ReportRenderer`].

pub mod charts;
pub mod error;
pub mod layout;
pub mod model;
pub mod providers;
pub mod report;
pub mod surface;
