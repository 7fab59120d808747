// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde_json::{Map, Value};

use super::body::JsonBody;
use crate::{
    error::ApiError,
    models::{TokenRequest, TokenResponse},
    state::AppState,
};

/// Sign the posted object as a one-hour HS384 token.
///
/// No credentials are checked: the caller chooses the claims, including the
/// email that `/my-toys` later trusts.
#[utoipa::path(
    post,
    path = "/generate-jwt-token",
    request_body = TokenRequest,
    tag = "Auth",
    responses((status = 200, body = TokenResponse))
)]
pub async fn generate_jwt_token(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Map<String, Value>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.tokens.issue(payload)?;
    Ok(Json(TokenResponse { token }))
}
