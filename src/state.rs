// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenService;
use crate::storage::{InMemoryStore, ToyStore};

/// Secret used by [`AppState::default`]. Test and local use only.
const DEV_SECRET: &[u8] = b"toy-master-dev-secret";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ToyStore>,
    pub tokens: Arc<TokenService>,
    /// Reject `/my-toys` requests whose token email differs from the
    /// queried email.
    pub enforce_owner_email: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn ToyStore>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            enforce_owner_email: false,
        }
    }

    pub fn with_owner_check(mut self, enforce: bool) -> Self {
        self.enforce_owner_email = enforce;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), TokenService::new(DEV_SECRET))
    }
}
