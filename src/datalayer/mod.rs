pub mod db_ops;
pub mod store;

pub use db_ops::{DatabaseHealth, DbConfig, DbManager, initialize_database};
pub use store::{DocumentStore, MongoStore};
