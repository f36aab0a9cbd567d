//! Storage collaborator boundary.
//!
//! The job and application repositories are traits so the HTTP layer never
//! depends on a concrete document store. [`MemoryDocumentStore`] is the adapter
//! used by the service binary and the test suites.

mod memory;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use memory::MemoryDocumentStore;

/// Acknowledgement returned to clients after a document insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

impl InsertResult {
    pub fn acknowledged(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Drop payload keys that the store owns so flattened extras cannot shadow them.
pub(crate) fn strip_reserved(details: &mut Map<String, Value>, reserved: &[&str]) {
    for key in reserved {
        details.remove(*key);
    }
}

pub(crate) fn next_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
