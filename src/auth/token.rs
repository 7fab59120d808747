// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS384 token issuance and verification.
//!
//! Tokens are signed with a single shared secret. Verification checks the
//! signature and, when present, the `exp` claim with no clock-skew leeway.
//! Issuer, audience and not-before claims are never validated.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::{AuthError, Claims};

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

const ALGORITHM: Algorithm = Algorithm::HS384;

/// Signs and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign `payload`, valid for [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, payload: Map<String, Value>) -> Result<String, AuthError> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign `payload` as if issued at `issued_at`.
    ///
    /// Caller-supplied `iat` and `exp` values are replaced.
    pub fn issue_at(
        &self,
        mut payload: Map<String, Value>,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expires_at = issued_at + Duration::seconds(TOKEN_TTL_SECS);
        payload.insert("iat".into(), Value::from(issued_at.timestamp()));
        payload.insert("exp".into(), Value::from(expires_at.timestamp()));

        encode(&Header::new(ALGORITHM), &payload, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token and return its payload.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                AuthError::InvalidToken
            })
    }
}
