pub mod constants;
pub mod types;
pub use constants::{DASHBOARD_COLLECTIONS, DEFAULT_DATABASE, URL};
pub use types::DbConfig;
