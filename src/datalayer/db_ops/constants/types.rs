use std::time::Duration;

/// Database configuration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub uri: String,
    /// Overrides the database named in the URI
    pub database: Option<String>,
    pub max_pool_size: u32,
    pub server_selection_timeout: Duration,
    pub connect_timeout: Duration,
}
