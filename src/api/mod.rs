// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_bearer,
    models::{
        Category, DeleteResult, InsertOneResult, TokenRequest, TokenResponse, Toy, ToyUpdate,
        UpdateResult,
    },
    state::AppState,
};

pub mod body;
pub mod categories;
pub mod health;
pub mod token;
pub mod toys;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/my-toys", get(toys::my_toys))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let routes = Router::new()
        .route("/", get(health::liveness))
        .route("/add-toy", post(toys::add_toy))
        .route("/remove-toy/{id}", delete(toys::remove_toy))
        .route("/update-toy/{id}", patch(toys::update_toy))
        .route("/toy-details/{id}", get(toys::toy_details))
        .route("/total-toys", get(toys::total_toys))
        .route("/category-toys/{category}", get(toys::category_toys))
        .route("/categories", get(categories::list_categories))
        .route("/toys", get(toys::list_toys))
        .route("/toys-by-category/{category}", get(toys::toys_by_category))
        .route("/generate-jwt-token", post(token::generate_jwt_token))
        .route("/search-toy", get(toys::search_toy))
        .merge(protected)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        toys::add_toy,
        toys::my_toys,
        toys::remove_toy,
        toys::update_toy,
        toys::toy_details,
        toys::total_toys,
        toys::category_toys,
        toys::list_toys,
        toys::toys_by_category,
        toys::search_toy,
        categories::list_categories,
        token::generate_jwt_token
    ),
    components(
        schemas(
            Toy,
            Category,
            ToyUpdate,
            InsertOneResult,
            DeleteResult,
            UpdateResult,
            TokenRequest,
            TokenResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Toys", description = "Toy listings"),
        (name = "Categories", description = "Toy categories"),
        (name = "Auth", description = "Token issuance")
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
