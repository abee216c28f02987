#[allow(clippy::module_inception)]
pub mod dashboard;

pub use dashboard::{DashboardSummary, summarize};
