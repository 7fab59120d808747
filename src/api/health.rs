// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

/// Body returned by the liveness endpoint.
pub const LIVENESS_TEXT: &str = "TOY MASTER SERVER IS RUNNING...";

/// Liveness probe handler.
///
/// Always returns 200 if the process is running. Does not touch the store.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = String, content_type = "text/plain")
    )
)]
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}
