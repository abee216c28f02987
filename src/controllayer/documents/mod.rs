#[allow(clippy::module_inception)]
pub mod documents;

pub use documents::{
    DEFAULT_LIST_LIMIT, ListQuery, create_document, delete_document, get_document,
    list_documents, require_object, update_document,
};
