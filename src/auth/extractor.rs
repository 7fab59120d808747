// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for verified token claims.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(claims): Auth) -> impl IntoResponse {
//!     // claims.email() is the caller's claimed email
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{middleware::authenticate, AuthError, Claims};
use crate::state::AppState;

/// Verified claims of the caller.
///
/// Reuses the claims stored by [`require_bearer`](super::require_bearer)
/// when the middleware ran; otherwise verifies the Authorization header
/// itself with the same rules.
pub struct Auth(pub Claims);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>().cloned() {
            return Ok(Auth(claims));
        }

        authenticate(&parts.headers, &state.tokens).map(Auth)
    }
}
