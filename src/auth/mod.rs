// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Shared-secret bearer tokens for the Toy Master API.
//!
//! ## Auth Flow
//!
//! 1. Client posts any JSON object (normally `{"email": ...}`) to
//!    `/generate-jwt-token` and receives an HS384 token valid for one hour
//! 2. Client sends `Authorization: Bearer <token>` on protected routes
//! 3. Server:
//!    - Rejects a missing header or the literal token `null` with 401
//!    - Rejects a bad signature or expired token with 403
//!    - Attaches the decoded claims to the request
//!
//! ## Security
//!
//! - Token issuance is unauthenticated: anyone can mint a token for any email
//! - Tokens are never revoked or refreshed
//! - No issuer or audience checks

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::Claims;
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::require_bearer;
pub use token::TokenService;
