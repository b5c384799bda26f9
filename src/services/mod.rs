//! Journal services: ingestion, query, aggregation

pub mod dashboard;
pub mod ingest;
pub mod query;

pub use dashboard::{dashboard_data, DashboardData};
pub use ingest::{submit_mood, submit_reflection, SubmitMoodRequest, SubmitReflectionRequest};
pub use query::{recent_entries, EntryView};
