pub mod collections;
pub mod dashboard;
pub mod frontend;
pub mod health;
