// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `toys`: ObjectId hex → serialized toy document
//! - `categories`: ObjectId hex → serialized category document
//!
//! Hex keys sort like the raw id bytes, so a forward scan yields documents in
//! insertion order.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::models::{Document, ToyUpdate, UpdateResult};

use super::memory::category_id;
use super::query::{run_query, FindOptions, ToyFilter};
use super::{with_id, ObjectId, StoreResult, ToyStore};

// =============================================================================
// Table Definitions
// =============================================================================

const TOYS: TableDefinition<&str, &[u8]> = TableDefinition::new("toys");

const CATEGORIES: TableDefinition<&str, &[u8]> = TableDefinition::new("categories");

// =============================================================================
// RedbStore
// =============================================================================

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TOYS)?;
            let _ = write_txn.open_table(CATEGORIES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    fn scan(
        &self,
        table: TableDefinition<'static, &'static str, &'static [u8]>,
    ) -> StoreResult<Vec<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;

        let mut docs = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            docs.push(serde_json::from_slice(value.value())?);
        }
        Ok(docs)
    }
}

impl ToyStore for RedbStore {
    fn backend(&self) -> &'static str {
        "redb"
    }

    fn insert_toy(&self, doc: Document) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        let json = serde_json::to_vec(&with_id(doc, &id))?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TOYS)?;
            table.insert(id.to_hex().as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(id)
    }

    fn find_toys(&self, filter: &ToyFilter, options: &FindOptions) -> StoreResult<Vec<Document>> {
        Ok(run_query(self.scan(TOYS)?, filter, options))
    }

    fn get_toy(&self, id: &ObjectId) -> StoreResult<Option<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TOYS)?;
        match table.get(id.to_hex().as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn delete_toy(&self, id: &ObjectId) -> StoreResult<u64> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(TOYS)?;
            let removed = table.remove(id.to_hex().as_str())?;
            removed.is_some()
        };
        write_txn.commit()?;
        Ok(u64::from(deleted))
    }

    fn update_toy(&self, id: &ObjectId, update: &ToyUpdate) -> StoreResult<UpdateResult> {
        let key = id.to_hex();
        let write_txn = self.db.begin_write()?;
        let result = {
            let mut table = write_txn.open_table(TOYS)?;

            // Read existing value and deserialize before mutating
            let existing = match table.get(key.as_str())? {
                Some(value) => Some(value.value().to_vec()),
                None => None,
            };

            match existing {
                Some(bytes) => {
                    let mut doc: Document = serde_json::from_slice(&bytes)?;
                    let modified = update.apply_to(&mut doc);
                    if modified {
                        let json = serde_json::to_vec(&doc)?;
                        table.insert(key.as_str(), json.as_slice())?;
                    }
                    UpdateResult::new(1, u64::from(modified))
                }
                None => UpdateResult::new(0, 0),
            }
        };
        write_txn.commit()?;
        Ok(result)
    }

    fn estimated_toy_count(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TOYS)?;
        Ok(table.len()?)
    }

    fn count_toys(&self, filter: &ToyFilter) -> StoreResult<u64> {
        Ok(self.scan(TOYS)?.iter().filter(|d| filter.matches(d)).count() as u64)
    }

    fn list_categories(&self) -> StoreResult<Vec<Document>> {
        self.scan(CATEGORIES)
    }

    fn replace_categories(&self, categories: Vec<Document>) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        write_txn.delete_table(CATEGORIES)?;
        {
            let mut table = write_txn.open_table(CATEGORIES)?;
            for doc in categories {
                let id = category_id(&doc);
                let json = serde_json::to_vec(&with_id(doc, &id))?;
                table.insert(id.to_hex().as_str(), json.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}
