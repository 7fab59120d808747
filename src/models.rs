// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response shapes used by the REST API.
//!
//! Toys and categories are schemaless JSON documents: the service stores
//! whatever object the caller sends and only reads the handful of fields it
//! queries on (`name`, `category`, `email`, `price`). Write operations answer
//! with small acknowledgement records in the shape document-store drivers
//! report them (`insertedId`, `deletedCount`, `matchedCount`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::storage::ObjectId;

/// A schemaless stored document. Stored toys carry their identifier under
/// [`ID_FIELD`].
pub type Document = Map<String, Value>;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

// =============================================================================
// Toy Models
// =============================================================================

/// Expected shape of a toy document.
///
/// Clients are trusted to send this shape; the service does not validate
/// bodies against it and stores extra fields untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Toy {
    /// Store-assigned identifier (24 hex characters).
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub rating: f64,
    pub details: String,
    /// Email of the seller who owns the listing.
    pub email: String,
}

/// Expected shape of a category document. Display data beyond `name` is
/// returned exactly as it was loaded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Category {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Fields overwritten by the update endpoint.
///
/// Every field is written on update. A field missing from the request body
/// is stored as `null`, replacing whatever value the toy had.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ToyUpdate {
    #[schema(value_type = Option<f64>)]
    #[serde(default)]
    pub price: Option<Value>,
    #[schema(value_type = Option<i64>)]
    #[serde(default)]
    pub quantity: Option<Value>,
    #[schema(value_type = Option<f64>)]
    #[serde(default)]
    pub rating: Option<Value>,
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    pub details: Option<Value>,
}

impl ToyUpdate {
    /// The full field set written by an update, absent values as `null`.
    pub fn field_set(&self) -> [(&'static str, Value); 4] {
        let value = |v: &Option<Value>| v.clone().unwrap_or(Value::Null);
        [
            ("price", value(&self.price)),
            ("quantity", value(&self.quantity)),
            ("rating", value(&self.rating)),
            ("details", value(&self.details)),
        ]
    }

    /// Overwrite the update fields on `doc`. Returns whether anything changed.
    pub fn apply_to(&self, doc: &mut Document) -> bool {
        let mut modified = false;
        for (field, value) in self.field_set() {
            if doc.get(field) != Some(&value) {
                doc.insert(field.to_string(), value);
                modified = true;
            }
        }
        modified
    }
}

// =============================================================================
// Write Acknowledgements
// =============================================================================

/// Result of inserting a toy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    #[schema(value_type = String)]
    pub inserted_id: ObjectId,
}

impl InsertOneResult {
    pub fn new(inserted_id: ObjectId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of deleting a toy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Result of updating a toy. Updates never upsert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<ObjectId>,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

// =============================================================================
// Token Models
// =============================================================================

/// Payload to sign. Any JSON object is accepted and signed as-is; `email`
/// is what protected routes read back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TokenRequest {
    pub email: Option<String>,
}

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_update_fields_overwrite_with_null() {
        let mut doc = json!({"name": "Robot", "price": 10, "quantity": 3, "rating": 4.5, "details": "shiny"})
            .as_object()
            .cloned()
            .unwrap();
        let update: ToyUpdate = serde_json::from_value(json!({"price": 12})).unwrap();

        assert!(update.apply_to(&mut doc));
        assert_eq!(doc["price"], json!(12));
        assert_eq!(doc["quantity"], Value::Null);
        assert_eq!(doc["rating"], Value::Null);
        assert_eq!(doc["details"], Value::Null);
        assert_eq!(doc["name"], json!("Robot"));
    }

    #[test]
    fn identical_update_reports_no_modification() {
        let mut doc = json!({"price": 1, "quantity": 2, "rating": 3, "details": "d"})
            .as_object()
            .cloned()
            .unwrap();
        let update: ToyUpdate =
            serde_json::from_value(json!({"price": 1, "quantity": 2, "rating": 3, "details": "d"}))
                .unwrap();
        assert!(!update.apply_to(&mut doc));
    }

    #[test]
    fn acknowledgements_use_driver_field_names() {
        let id: ObjectId = "64b7f0c2a1b2c3d4e5f60718".parse().unwrap();
        assert_eq!(
            serde_json::to_value(InsertOneResult::new(id)).unwrap(),
            json!({"acknowledged": true, "insertedId": "64b7f0c2a1b2c3d4e5f60718"})
        );
        assert_eq!(
            serde_json::to_value(DeleteResult::new(1)).unwrap(),
            json!({"acknowledged": true, "deletedCount": 1})
        );
        assert_eq!(
            serde_json::to_value(UpdateResult::new(1, 0)).unwrap(),
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 0,
                "upsertedCount": 0,
                "upsertedId": null
            })
        );
    }
}
