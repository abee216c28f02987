pub mod dashboard;
pub mod documents;
pub mod health;
