//! Profit reporting — action-plan insights, dashboard aggregates, and the
//! plain-text audit report.

pub mod dashboard;
pub mod delivery;
pub mod insights;
pub mod report_builder;

pub use dashboard::{overview, star_performer, DashboardOverview};
pub use delivery::{deliver_report, FileSink, ReportDelivery, ReportSink};
pub use insights::{generate_insights, Insight, InsightCategory};
pub use report_builder::build_report;
