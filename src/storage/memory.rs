// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process-local document store.
//!
//! Used by the test suite and when `DATABASE_PATH` is unset. Contents are
//! lost when the process exits.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Document, ToyUpdate, UpdateResult, ID_FIELD};

use super::query::{run_query, FindOptions, ToyFilter};
use super::{with_id, ObjectId, StoreError, StoreResult, ToyStore};

#[derive(Default)]
struct Collections {
    toys: BTreeMap<ObjectId, Document>,
    categories: BTreeMap<ObjectId, Document>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

/// Keep a valid caller-supplied `_id`, otherwise allocate one.
pub(crate) fn category_id(doc: &Document) -> ObjectId {
    doc.get(ID_FIELD)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

impl ToyStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn insert_toy(&self, doc: Document) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        self.write()?.toys.insert(id, with_id(doc, &id));
        Ok(id)
    }

    fn find_toys(&self, filter: &ToyFilter, options: &FindOptions) -> StoreResult<Vec<Document>> {
        let collections = self.read()?;
        Ok(run_query(collections.toys.values().cloned(), filter, options))
    }

    fn get_toy(&self, id: &ObjectId) -> StoreResult<Option<Document>> {
        Ok(self.read()?.toys.get(id).cloned())
    }

    fn delete_toy(&self, id: &ObjectId) -> StoreResult<u64> {
        Ok(u64::from(self.write()?.toys.remove(id).is_some()))
    }

    fn update_toy(&self, id: &ObjectId, update: &ToyUpdate) -> StoreResult<UpdateResult> {
        let mut collections = self.write()?;
        match collections.toys.get_mut(id) {
            Some(doc) => {
                let modified = update.apply_to(doc);
                Ok(UpdateResult::new(1, u64::from(modified)))
            }
            None => Ok(UpdateResult::new(0, 0)),
        }
    }

    fn estimated_toy_count(&self) -> StoreResult<u64> {
        Ok(self.read()?.toys.len() as u64)
    }

    fn count_toys(&self, filter: &ToyFilter) -> StoreResult<u64> {
        let collections = self.read()?;
        Ok(collections.toys.values().filter(|d| filter.matches(d)).count() as u64)
    }

    fn list_categories(&self) -> StoreResult<Vec<Document>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    fn replace_categories(&self, categories: Vec<Document>) -> StoreResult<()> {
        let fresh = categories
            .into_iter()
            .map(|doc| {
                let id = category_id(&doc);
                (id, with_id(doc, &id))
            })
            .collect();
        self.write()?.categories = fresh;
        Ok(())
    }
}
