pub mod builder;
pub mod constants;
pub mod db_health;
pub mod db_ops;

pub use crate::datalayer::db_ops::constants::DbConfig;
pub use db_health::{DatabaseHealth, check_database_health};
pub use db_ops::{DbManager, initialize_database};
