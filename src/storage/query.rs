// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Query model for the toys collection.
//!
//! Filters, price sorting, and skip/limit windows are evaluated here so that
//! every backend answers the same query with the same documents in the same
//! order. Backends only decide how documents are enumerated (natural order,
//! i.e. ascending [`ObjectId`](super::ObjectId)).

use std::cmp::Ordering;

use serde_json::Value;

use crate::models::Document;

/// Document predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToyFilter {
    /// Every document.
    All,
    /// `email` equals the value. `None` matches documents with a missing or
    /// null `email`.
    Email(Option<String>),
    /// `category` equals the value.
    Category(String),
    /// Case-insensitive substring match against `name`.
    NameContains(String),
}

impl ToyFilter {
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            ToyFilter::All => true,
            ToyFilter::Email(email) => field_equals(doc, "email", email.as_deref()),
            ToyFilter::Category(category) => field_equals(doc, "category", Some(category)),
            ToyFilter::NameContains(needle) => match doc.get("name") {
                Some(Value::String(name)) => {
                    name.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
        }
    }
}

fn field_equals(doc: &Document, field: &str, expected: Option<&str>) -> bool {
    match (doc.get(field), expected) {
        (Some(Value::String(actual)), Some(expected)) => actual == expected,
        (None | Some(Value::Null), None) => true,
        _ => false,
    }
}

/// Ordering applied on the `price` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    Ascending,
    Descending,
    #[default]
    Unsorted,
}

impl PriceSort {
    /// Interpret the `sortBy` query value. Anything unrecognised, including
    /// `"None"`, leaves results unsorted.
    pub fn from_query(sort_by: Option<&str>) -> Self {
        match sort_by {
            Some("Ascending (price)") => PriceSort::Ascending,
            Some("Descending (price)") => PriceSort::Descending,
            _ => PriceSort::Unsorted,
        }
    }
}

/// Sort and window applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: PriceSort,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted(sort: PriceSort) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Zero-based page window.
    pub fn page(page: usize, limit: usize) -> Self {
        Self {
            sort: PriceSort::Unsorted,
            skip: page.saturating_mul(limit),
            limit: Some(limit),
        }
    }
}

/// Rank of a BSON-like type in cross-type comparisons: missing and null
/// first, then numbers, then strings.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Compare two `price` fields by type rank, then by value within a type.
/// Strings compare lexicographically.
fn compare_price(a: &Document, b: &Document) -> Ordering {
    let (a, b) = (a.get("price"), b.get("price"));
    type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    })
}

/// Evaluate a query over documents supplied in natural order.
pub fn run_query<I>(docs: I, filter: &ToyFilter, options: &FindOptions) -> Vec<Document>
where
    I: IntoIterator<Item = Document>,
{
    let mut matched: Vec<Document> = docs.into_iter().filter(|d| filter.matches(d)).collect();

    match options.sort {
        PriceSort::Ascending => matched.sort_by(compare_price),
        PriceSort::Descending => matched.sort_by(|a, b| compare_price(b, a)),
        PriceSort::Unsorted => {}
    }

    let window = matched.into_iter().skip(options.skip);
    match options.limit {
        Some(limit) => window.take(limit).collect(),
        None => window.collect(),
    }
}
