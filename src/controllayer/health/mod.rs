#[allow(clippy::module_inception)]
pub mod health;

pub use health::{HealthResponse, ReadinessResponse, health_report, readiness_report};
