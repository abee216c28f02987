use mongodb::{bson::doc, Database};
use std::time::Instant;
use tracing::error;

/// Database health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DatabaseHealth {
    pub is_healthy: bool,
    pub latency_ms: u64,
    pub database: String,
}

/// Ping the database and measure the round trip
pub async fn check_database_health(db: &Database) -> Result<DatabaseHealth, mongodb::error::Error> {
    let start = Instant::now();

    db.run_command(doc! { "ping": 1 }).await.map_err(|e| {
        error!(database = %db.name(), error = %e, "Database health check failed");
        e
    })?;

    Ok(DatabaseHealth {
        is_healthy: true,
        latency_ms: start.elapsed().as_millis() as u64,
        database: db.name().to_string(),
    })
}
