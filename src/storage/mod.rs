// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage
//!
//! Handlers never talk to a concrete database. They receive an
//! `Arc<dyn ToyStore>` through [`AppState`](crate::state::AppState) and
//! issue collection operations against it.
//!
//! ## Backends
//!
//! - [`InMemoryStore`]: process-local, used by tests and when no database
//!   path is configured
//! - [`RedbStore`]: embedded ACID database file (redb)
//!
//! ## Collections
//!
//! ```text
//! toys        _id (ObjectId hex) → toy document (JSON)
//! categories  _id (ObjectId hex) → category document (JSON), read-only over HTTP
//! ```
//!
//! Both backends enumerate documents in ascending id order, which is the
//! order they were inserted in. Query evaluation lives in [`query`].

pub mod error;
pub mod memory;
pub mod object_id;
pub mod query;
pub mod redb_store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use object_id::ObjectId;
pub use query::{FindOptions, PriceSort, ToyFilter};
pub use redb_store::RedbStore;

use serde_json::Value;

use crate::models::{Document, ToyUpdate, UpdateResult, ID_FIELD};

/// Collection operations over toys and categories.
pub trait ToyStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Insert a toy document, assigning it a fresh identifier.
    fn insert_toy(&self, doc: Document) -> StoreResult<ObjectId>;

    /// Toys matching `filter`, sorted and windowed by `options`.
    fn find_toys(&self, filter: &ToyFilter, options: &FindOptions) -> StoreResult<Vec<Document>>;

    /// A single toy, or `None` if absent.
    fn get_toy(&self, id: &ObjectId) -> StoreResult<Option<Document>>;

    /// Delete a toy. Returns the number of deleted documents (0 or 1).
    fn delete_toy(&self, id: &ObjectId) -> StoreResult<u64>;

    /// Overwrite the update field set of a toy.
    fn update_toy(&self, id: &ObjectId, update: &ToyUpdate) -> StoreResult<UpdateResult>;

    /// Collection size without evaluating a filter.
    fn estimated_toy_count(&self) -> StoreResult<u64>;

    /// Number of toys matching `filter`.
    fn count_toys(&self, filter: &ToyFilter) -> StoreResult<u64>;

    /// Every category document.
    fn list_categories(&self) -> StoreResult<Vec<Document>>;

    /// Replace the whole categories collection.
    fn replace_categories(&self, categories: Vec<Document>) -> StoreResult<()>;
}

/// Stamp a document with `id`, replacing any caller-supplied identifier.
pub(crate) fn with_id(mut doc: Document, id: &ObjectId) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
    doc
}

/// Turn an arbitrary JSON value into a document.
pub fn into_document(value: Value) -> StoreResult<Document> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotADocument),
    }
}

/// Load a JSON array of category documents.
pub fn parse_categories(json: &str) -> StoreResult<Vec<Document>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values.into_iter().map(into_document).collect()
}
