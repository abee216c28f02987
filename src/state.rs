use std::sync::Arc;

use crate::config::ServiceKind;
use crate::datalayer::store::DocumentStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Document store backing every route group
    pub store: Arc<dyn DocumentStore>,
    pub service: ServiceKind,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, service: ServiceKind) -> Self {
        Self { store, service }
    }
}
