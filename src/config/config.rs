use std::path::PathBuf;

use crate::cors::AllowList;
use crate::datalayer::db_ops::constants::DbConfig;
use crate::errors::{ServiceError, ServiceResult};

/// Which of the two lending backends this process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Students and books, plus the built frontend
    Library,
    /// Dashboard summary and loans
    Dashboard,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Library => "library-backend",
            ServiceKind::Dashboard => "dashboard-backend",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Library => 5000,
            ServiceKind::Dashboard => 5002,
        }
    }

    pub fn health_message(&self) -> &'static str {
        match self {
            ServiceKind::Library => "Library Backend is running",
            ServiceKind::Dashboard => "Dashboard Backend is running",
        }
    }

    /// Collections exposed as CRUD route groups under `/api/<name>`
    pub fn collections(&self) -> &'static [&'static str] {
        match self {
            ServiceKind::Library => &["students", "books"],
            ServiceKind::Dashboard => &["loans"],
        }
    }

    pub fn serves_frontend(&self) -> bool {
        matches!(self, ServiceKind::Library)
    }

    pub fn has_dashboard(&self) -> bool {
        matches!(self, ServiceKind::Dashboard)
    }
}

/// Process configuration, resolved once before the listener starts
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service: ServiceKind,
    pub host: String,
    pub port: u16,
    pub database: DbConfig,
    pub allow_list: AllowList,
    pub frontend_build_dir: PathBuf,
}

impl AppConfig {
    /// Defaults for `service`, with an empty allow-list
    pub fn new(service: ServiceKind) -> Self {
        Self {
            service,
            host: "0.0.0.0".to_string(),
            port: service.default_port(),
            database: DbConfig::default(),
            allow_list: AllowList::default(),
            frontend_build_dir: PathBuf::from("frontend/build"),
        }
    }

    /// Read the process environment
    pub fn from_env(service: ServiceKind) -> ServiceResult<Self> {
        Self::from_lookup(service, |key| std::env::var(key).ok())
    }

    /// Resolve every setting through `lookup`. Unset or empty values keep
    /// their defaults.
    pub fn from_lookup<F>(service: ServiceKind, lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::new(service);

        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| {
                ServiceError::ConfigurationError(format!("PORT must be a port number, got {port:?}"))
            })?;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(uri) = get("MONGODB_URI") {
            config.database = config.database.set_uri(uri);
        }
        if let Some(database) = get("MONGODB_DATABASE") {
            config.database = config.database.set_database(database);
        }
        if let Some(dir) = get("FRONTEND_BUILD_DIR") {
            config.frontend_build_dir = PathBuf::from(dir);
        }
        config.allow_list = AllowList::from_lookup(&lookup);

        Ok(config)
    }

    pub fn with_allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn with_frontend_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frontend_build_dir = dir.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
