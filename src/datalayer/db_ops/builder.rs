use std::time::Duration;

use crate::datalayer::db_ops::constants;
use crate::datalayer::db_ops::constants::DbConfig;

/*
Default configuration for the MongoDB client.
- uri: mongodb://localhost:27017/lendify
- max_pool_size: 10
- server_selection_timeout: 30 seconds
- connect_timeout: 45 seconds
*/
impl Default for DbConfig {
    fn default() -> Self {
        Self {
            uri: constants::URL.to_string(),
            database: None,
            max_pool_size: 10,
            server_selection_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(45),
        }
    }
}

// Builder pattern for DbConfig
impl DbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn set_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn set_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    pub fn set_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    pub fn set_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
