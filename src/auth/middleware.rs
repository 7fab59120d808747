// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token middleware for Axum.
//!
//! Applied with `axum::middleware::from_fn_with_state` to the routes that
//! require a token. On success the decoded [`Claims`] are inserted into the
//! request extensions, where the [`Auth`](super::Auth) extractor picks them
//! up.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/my-toys", get(toys::my_toys))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_bearer,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, Claims, TokenService};
use crate::state::AppState;

/// Pull the token out of the Authorization header.
///
/// The token is the second space-separated element of the header value; the
/// scheme word in front of it is not inspected.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let token = header.split(' ').nth(1).ok_or(AuthError::InvalidToken)?;

    // Clients that lost their token send the literal string "null".
    if token == "null" {
        return Err(AuthError::NullToken);
    }

    Ok(token)
}

/// Verify the request's bearer token.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<Claims, AuthError> {
    let token = bearer_token(headers)?;
    tokens.verify(token)
}

/// Authentication middleware function.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), error = %e, "request rejected");
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn null_token() {
        assert!(matches!(bearer_token(&headers("Bearer null")), Err(AuthError::NullToken)));
    }

    #[test]
    fn header_without_token_part() {
        assert!(matches!(bearer_token(&headers("Bearer")), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn extracts_second_element() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("Token abc")).unwrap(), "abc");
        assert_eq!(bearer_token(&headers("Bearer  abc")).unwrap(), "");
    }

    #[test]
    fn authenticate_round_trip() {
        let tokens = TokenService::new(b"secret");
        let mut payload = serde_json::Map::new();
        payload.insert("email".into(), "a@b.com".into());
        let token = tokens.issue(payload).unwrap();

        let claims = authenticate(&headers(&format!("Bearer {token}")), &tokens).unwrap();
        assert_eq!(claims.email(), Some("a@b.com"));
    }
}
