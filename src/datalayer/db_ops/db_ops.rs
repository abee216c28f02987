use crate::datalayer::db_ops::constants::{DbConfig, DEFAULT_DATABASE};
use crate::datalayer::db_ops::db_health::{check_database_health, DatabaseHealth};
use mongodb::{options::ClientOptions, Client, Database};
use tracing::{error, info};

/// MongoDB connection manager
///
/// `Client` is internally pooled and cheap to clone, so the manager can be
/// handed to every request task.
#[derive(Clone, Debug)]
pub struct DbManager {
    client: Client,
    database: Database,
}

impl DbManager {
    /// Parses the connection string, applies pool/timeout settings and
    /// selects the database. Does not touch the network yet.
    pub async fn new(config: DbConfig) -> Result<Self, mongodb::error::Error> {
        info!("Initializing MongoDB client...");

        let mut options = ClientOptions::parse(config.uri.as_str()).await.map_err(|e| {
            error!(error = %e, "Failed to parse MongoDB connection string");
            e
        })?;
        options.max_pool_size = Some(config.max_pool_size);
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.connect_timeout = Some(config.connect_timeout);

        let database_name = config
            .database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)?;
        let database = client.database(&database_name);

        info!(database = %database_name, "MongoDB client created");

        Ok(Self { client, database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Health check - verifies database connectivity
    pub async fn health_check(&self) -> Result<DatabaseHealth, mongodb::error::Error> {
        check_database_health(&self.database).await
    }

    /// Graceful shutdown - waits for in-flight operations and closes the pool
    pub async fn shutdown(&self) {
        info!("Shutting down MongoDB client...");
        self.client.clone().shutdown().await;
        info!("MongoDB client closed");
    }

    /// Ping the server and log the round trip
    pub async fn test_connection(&self) -> Result<(), mongodb::error::Error> {
        info!("Attempting to connect to MongoDB...");

        let health = self.health_check().await?;

        info!(
            database = %health.database,
            latency_ms = health.latency_ms,
            "MongoDB connection test successful"
        );

        Ok(())
    }
}

/// Initialize database connection at application startup
/// A failure here is fatal for the process.
pub async fn initialize_database(config: DbConfig) -> Result<DbManager, mongodb::error::Error> {
    info!("=== Database Initialization Started ===");

    let db_manager = DbManager::new(config).await?;

    if let Err(e) = db_manager.test_connection().await {
        error!(error = %e, "MongoDB connection error");
        error!("Check the MONGODB_URI credentials, that this host is allowed by the cluster, and network connectivity");
        return Err(e);
    }

    info!("=== Database Initialization Completed ===");

    Ok(db_manager)
}
