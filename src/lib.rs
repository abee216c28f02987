// Library exports for the two service binaries and for testing
pub mod config;
pub mod controllayer;
pub mod cors;
pub mod datalayer;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
