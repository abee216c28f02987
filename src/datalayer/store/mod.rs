pub mod document_store;
pub mod mongo_store;

pub use document_store::{DocumentStore, JsonDocument};
pub use mongo_store::MongoStore;

#[cfg(test)]
pub use document_store::MockDocumentStore;
