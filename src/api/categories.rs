// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{Category, Document},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses((status = 200, body = [Category]))
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.store.list_categories()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::into_document;
    use serde_json::json;

    #[tokio::test]
    async fn lists_seeded_categories() {
        let state = AppState::default();
        state
            .store
            .replace_categories(vec![
                into_document(json!({"name": "Science Kits", "image": "kits.png"})).unwrap(),
                into_document(json!({"name": "Dolls"})).unwrap(),
            ])
            .unwrap();

        let Json(categories) = list_categories(State(state)).await.unwrap();
        assert_eq!(categories.len(), 2);
        assert!(categories.iter().any(|c| c["image"] == json!("kits.png")));
    }

    #[tokio::test]
    async fn empty_without_seed() {
        let Json(categories) = list_categories(State(AppState::default())).await.unwrap();
        assert!(categories.is_empty());
    }
}
