// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process};

use axum_server::Handle;
use toy_master_server::{
    api::router,
    auth::TokenService,
    config::Config,
    server::{ctrl_c, open_store, seed_categories, shutdown_on},
    state::AppState,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "failed to open store");
            process::exit(1);
        }
    };
    tracing::info!(backend = store.backend(), "store ready");

    if let Some(path) = &config.categories_file {
        if let Err(err) = seed_categories(store.as_ref(), path) {
            tracing::error!(error = %err, path = %path.display(), "failed to load categories");
            process::exit(1);
        }
    }

    let tokens = TokenService::new(config.access_token_secret.as_bytes());
    let state = AppState::new(store, tokens).with_owner_check(config.enforce_owner_email);
    let app = router(state);

    let handle = Handle::<SocketAddr>::new();
    tokio::spawn(shutdown_on(handle.clone(), ctrl_c()));

    tracing::info!("Toy Master running on {} (docs at /docs)", config.addr);

    if let Err(err) = axum_server::bind(config.addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(error = %err, "server failed");
        process::exit(1);
    }
}
