// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Toy endpoints.
//!
//! Handlers translate query strings and path segments into store queries and
//! return the store's results unchanged. Only `/my-toys` requires a token.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::body::JsonBody;
use crate::{
    auth::{Auth, AuthError},
    error::ApiError,
    models::{DeleteResult, Document, InsertOneResult, Toy, ToyUpdate, UpdateResult},
    state::AppState,
    storage::{FindOptions, ObjectId, PriceSort, ToyFilter},
};

/// Page size of `/toys` when `limit` is absent.
pub const DEFAULT_TOYS_LIMIT: usize = 20;

/// Page size of `/toys-by-category` when `limit` is absent.
pub const DEFAULT_CATEGORY_LIMIT: usize = 6;

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MyToysQuery {
    /// Owner email to list toys for
    pub email: Option<String>,
    /// `Ascending (price)`, `Descending (price)`, or `None`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// Pagination parameters.
///
/// Values are parsed leniently: anything that is not a positive integer
/// falls back to the default.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Zero-based page number (default 0)
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn options(&self, default_limit: usize) -> FindOptions {
        let page = parse_positive(self.page.as_deref()).unwrap_or(0);
        let limit = parse_positive(self.limit.as_deref()).unwrap_or(default_limit);
        FindOptions::page(page, limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the toy name
    pub search: Option<String>,
}

fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    Ok(raw.parse::<ObjectId>()?)
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/add-toy",
    request_body = Toy,
    tag = "Toys",
    responses((status = 200, body = InsertOneResult))
)]
pub async fn add_toy(
    State(state): State<AppState>,
    JsonBody(toy): JsonBody<Document>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let id = state.store.insert_toy(toy)?;
    tracing::info!(toy_id = %id, "toy added");
    Ok(Json(InsertOneResult::new(id)))
}

#[utoipa::path(
    get,
    path = "/my-toys",
    params(MyToysQuery),
    tag = "Toys",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Toy]),
        (status = 401, description = "Missing or null token"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn my_toys(
    State(state): State<AppState>,
    Auth(claims): Auth,
    Query(query): Query<MyToysQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    // Off by default: historically any valid token could list any seller's
    // toys, and clients depend on that.
    if state.enforce_owner_email && claims.email() != query.email.as_deref() {
        return Err(AuthError::OwnerMismatch.into());
    }

    let sort = PriceSort::from_query(query.sort_by.as_deref());
    let toys = state
        .store
        .find_toys(&ToyFilter::Email(query.email), &FindOptions::sorted(sort))?;
    Ok(Json(toys))
}

#[utoipa::path(
    delete,
    path = "/remove-toy/{id}",
    params(("id" = String, Path, description = "Toy identifier")),
    tag = "Toys",
    responses((status = 200, body = DeleteResult))
)]
pub async fn remove_toy(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.store.delete_toy(&id)?;
    tracing::info!(toy_id = %id, deleted, "toy removal");
    Ok(Json(DeleteResult::new(deleted)))
}

#[utoipa::path(
    patch,
    path = "/update-toy/{id}",
    params(("id" = String, Path, description = "Toy identifier")),
    request_body = ToyUpdate,
    tag = "Toys",
    responses((status = 200, body = UpdateResult))
)]
pub async fn update_toy(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(update): JsonBody<ToyUpdate>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_id(&id)?;
    let result = state.store.update_toy(&id, &update)?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/toy-details/{id}",
    params(("id" = String, Path, description = "Toy identifier")),
    tag = "Toys",
    responses((status = 200, description = "The toy, or null when absent", body = Toy))
)]
pub async fn toy_details(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Option<Document>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_toy(&id)?))
}

#[utoipa::path(
    get,
    path = "/total-toys",
    tag = "Toys",
    responses((status = 200, description = "Approximate number of toys", body = u64))
)]
pub async fn total_toys(State(state): State<AppState>) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.store.estimated_toy_count()?))
}

#[utoipa::path(
    get,
    path = "/category-toys/{category}",
    params(("category" = String, Path, description = "Category name")),
    tag = "Toys",
    responses((status = 200, description = "Number of toys in the category", body = u64))
)]
pub async fn category_toys(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.store.count_toys(&ToyFilter::Category(category))?))
}

#[utoipa::path(
    get,
    path = "/toys",
    params(PageQuery),
    tag = "Toys",
    responses((status = 200, body = [Toy]))
)]
pub async fn list_toys(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let options = page.options(DEFAULT_TOYS_LIMIT);
    Ok(Json(state.store.find_toys(&ToyFilter::All, &options)?))
}

#[utoipa::path(
    get,
    path = "/toys-by-category/{category}",
    params(
        ("category" = String, Path, description = "Category name"),
        PageQuery
    ),
    tag = "Toys",
    responses((status = 200, body = [Toy]))
)]
pub async fn toys_by_category(
    Path(category): Path<String>,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let options = page.options(DEFAULT_CATEGORY_LIMIT);
    Ok(Json(
        state
            .store
            .find_toys(&ToyFilter::Category(category), &options)?,
    ))
}

#[utoipa::path(
    get,
    path = "/search-toy",
    params(SearchQuery),
    tag = "Toys",
    responses((status = 200, body = [Toy]))
)]
pub async fn search_toy(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter = ToyFilter::NameContains(query.search.unwrap_or_default());
    Ok(Json(state.store.find_toys(&filter, &FindOptions::default())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use crate::models::ID_FIELD;
    use crate::storage::into_document;
    use axum::http::StatusCode;
    use serde_json::json;

    fn toy(name: &str, category: &str, price: f64, email: &str) -> Document {
        into_document(json!({
            "name": name,
            "category": category,
            "price": price,
            "quantity": 1,
            "rating": 4.0,
            "details": "",
            "email": email,
        }))
        .unwrap()
    }

    fn claims(email: &str) -> Claims {
        Claims(into_document(json!({"email": email})).unwrap())
    }

    #[test]
    fn page_query_defaults_and_leniency() {
        let options = PageQuery::default().options(DEFAULT_TOYS_LIMIT);
        assert_eq!((options.skip, options.limit), (0, Some(20)));

        let options = PageQuery {
            page: Some("2".into()),
            limit: Some("5".into()),
        }
        .options(DEFAULT_TOYS_LIMIT);
        assert_eq!((options.skip, options.limit), (10, Some(5)));

        let options = PageQuery {
            page: Some("abc".into()),
            limit: Some("0".into()),
        }
        .options(DEFAULT_CATEGORY_LIMIT);
        assert_eq!((options.skip, options.limit), (0, Some(6)));
    }

    #[tokio::test]
    async fn add_then_fetch_details() {
        let state = AppState::default();
        let original = toy("Robot", "tech", 20.0, "a@b.com");

        let Json(inserted) = add_toy(State(state.clone()), JsonBody(original.clone()))
            .await
            .expect("insert succeeds");
        assert!(inserted.acknowledged);

        let Json(found) = toy_details(Path(inserted.inserted_id.to_hex()), State(state))
            .await
            .expect("lookup succeeds");
        let mut found = found.expect("toy exists");
        assert_eq!(found.remove(ID_FIELD), Some(json!(inserted.inserted_id.to_hex())));
        assert_eq!(found, original);
    }

    #[tokio::test]
    async fn details_of_missing_toy_is_null() {
        let state = AppState::default();
        let Json(found) = toy_details(Path(ObjectId::new().to_hex()), State(state))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn invalid_id_is_internal_error() {
        let state = AppState::default();
        let err = remove_toy(Path("not-an-id".into()), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn my_toys_ignores_token_email_by_default() {
        let state = AppState::default();
        state.store.insert_toy(toy("Robot", "tech", 20.0, "seller@x.com")).unwrap();

        let Json(toys) = my_toys(
            State(state),
            Auth(claims("someone-else@x.com")),
            Query(MyToysQuery {
                email: Some("seller@x.com".into()),
                sort_by: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(toys.len(), 1);
    }

    #[tokio::test]
    async fn my_toys_owner_check_when_enforced() {
        let state = AppState::default().with_owner_check(true);
        state.store.insert_toy(toy("Robot", "tech", 20.0, "seller@x.com")).unwrap();

        let err = my_toys(
            State(state.clone()),
            Auth(claims("someone-else@x.com")),
            Query(MyToysQuery {
                email: Some("seller@x.com".into()),
                sort_by: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let Json(toys) = my_toys(
            State(state),
            Auth(claims("seller@x.com")),
            Query(MyToysQuery {
                email: Some("seller@x.com".into()),
                sort_by: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(toys.len(), 1);
    }

    #[tokio::test]
    async fn update_reports_match_and_modification() {
        let state = AppState::default();
        let id = state.store.insert_toy(toy("Robot", "tech", 20.0, "a@b.com")).unwrap();

        let update: ToyUpdate =
            serde_json::from_value(json!({"price": 25, "quantity": 3, "rating": 5, "details": "new"}))
                .unwrap();
        let Json(result) = update_toy(Path(id.to_hex()), State(state.clone()), JsonBody(update))
            .await
            .unwrap();
        assert_eq!((result.matched_count, result.modified_count), (1, 1));

        let Json(missing) = update_toy(
            Path(ObjectId::new().to_hex()),
            State(state),
            JsonBody(ToyUpdate::default()),
        )
        .await
        .unwrap();
        assert_eq!((missing.matched_count, missing.modified_count), (0, 0));
    }

    #[tokio::test]
    async fn category_listing_and_count() {
        let state = AppState::default();
        for i in 0..8 {
            let category = if i < 7 { "dolls" } else { "cars" };
            state
                .store
                .insert_toy(toy(&format!("toy-{i}"), category, i as f64, "a@b.com"))
                .unwrap();
        }

        let Json(first_page) = toys_by_category(
            Path("dolls".into()),
            State(state.clone()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(first_page.len(), DEFAULT_CATEGORY_LIMIT);

        let Json(second_page) = toys_by_category(
            Path("dolls".into()),
            State(state.clone()),
            Query(PageQuery {
                page: Some("1".into()),
                limit: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(second_page.len(), 1);

        let Json(count) = category_toys(Path("dolls".into()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(count, 7);

        let Json(total) = total_toys(State(state)).await.unwrap();
        assert_eq!(total, 8);
    }

    #[tokio::test]
    async fn stored_toys_match_documented_shape() {
        let state = AppState::default();
        let id = state.store.insert_toy(toy("Robot", "tech", 20.0, "a@b.com")).unwrap();
        let Json(found) = toy_details(Path(id.to_hex()), State(state)).await.unwrap();

        let parsed: Toy = serde_json::from_value(found.unwrap().into()).unwrap();
        assert_eq!(parsed.id, Some(id.to_hex()));
        assert_eq!(parsed.name, "Robot");
    }
}
