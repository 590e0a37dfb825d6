//! Document store abstraction.
//!
//! The directory data lives in a managed document database. This module
//! captures the handful of capabilities the services need behind the
//! [`DocumentStore`] trait, and ships the Firestore REST implementation.
//! The store handle is constructed once at startup and passed explicitly;
//! there is no global client.

mod firestore;

pub use firestore::FirestoreStore;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Collection names as constants to avoid stringly-typed lookups.
pub mod collections {
    pub const MEMBERS: &str = "members";
    pub const FOCUSES: &str = "focuses";
    pub const INDUSTRIES: &str = "industries";
    pub const REGIONS: &str = "regions";
}

/// A raw document: its collection-unique id plus a schemaless field mapping.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// Document store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Transport-level failure or unexpected response status
    Transport(String),
    /// Credential loading or token exchange failure
    Auth(String),
    /// Response payload did not decode
    Decode(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Transport(msg) => write!(f, "store transport error: {}", msg),
            StoreError::Auth(msg) => write!(f, "store auth error: {}", msg),
            StoreError::Decode(msg) => write!(f, "store decode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Read-only capabilities over the document database.
///
/// Listing order is the store's implicit document-id order; it is stable
/// within a snapshot but not across concurrent writes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents in `collection` whose `status` field equals `status`,
    /// in id order, optionally resuming strictly after `start_after` and
    /// capped at `limit`.
    async fn list(
        &self,
        collection: &str,
        status: &str,
        start_after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Count documents in `collection` whose `status` field equals `status`.
    async fn count(&self, collection: &str, status: &str) -> Result<u64, StoreError>;

    /// Fetch a single document by id, regardless of status.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Whether a document with this id exists, regardless of status.
    async fn exists(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self.get(collection, id).await?.is_some())
    }
}
