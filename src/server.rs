// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup wiring shared by the binary: store selection, category seeding,
//! and graceful shutdown.

use std::{future::Future, net::SocketAddr, path::Path, sync::Arc, time::Duration};

use axum_server::Handle;

use crate::config::Config;
use crate::storage::{parse_categories, InMemoryStore, RedbStore, StoreResult, ToyStore};

/// How long in-flight requests get to finish after shutdown is requested.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// redb when `DATABASE_PATH` is set, in-memory otherwise.
pub fn open_store(config: &Config) -> StoreResult<Arc<dyn ToyStore>> {
    Ok(match &config.database_path {
        Some(path) => Arc::new(RedbStore::open(path)?),
        None => Arc::new(InMemoryStore::new()),
    })
}

/// Replace the categories collection with the JSON array stored at `path`.
pub fn seed_categories(store: &dyn ToyStore, path: &Path) -> StoreResult<usize> {
    let categories = parse_categories(&std::fs::read_to_string(path)?)?;
    let count = categories.len();
    store.replace_categories(categories)?;
    tracing::info!(count, path = %path.display(), "categories loaded");
    Ok(count)
}

/// Start a graceful shutdown of `handle` once `signal` resolves.
pub async fn shutdown_on<F>(handle: Handle<SocketAddr>, signal: F)
where
    F: Future<Output = ()>,
{
    signal.await;
    tracing::info!("shutdown requested");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;
    use axum::{routing::get, Router};
    use tempfile::TempDir;
    use tokio::sync::oneshot;

    fn config(database_path: Option<&Path>) -> Config {
        let path = database_path.map(|p| p.display().to_string());
        Config::from_lookup(|name| match name {
            "ACCESS_TOKEN_SECRET" => Some("secret".into()),
            "DATABASE_PATH" => path.clone(),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn open_store_defaults_to_memory() {
        let store = open_store(&config(None)).unwrap();
        assert_eq!(store.backend(), "memory");
    }

    #[test]
    fn open_store_uses_redb_when_path_set() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&config(Some(&dir.path().join("data/toys.redb")))).unwrap();
        assert_eq!(store.backend(), "redb");
    }

    #[test]
    fn seeds_categories_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, r#"[{"name":"Dolls"},{"name":"Science Kits"}]"#).unwrap();

        let store = InMemoryStore::new();
        assert_eq!(seed_categories(&store, &path).unwrap(), 2);
        assert_eq!(store.list_categories().unwrap().len(), 2);
    }

    #[test]
    fn missing_categories_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = InMemoryStore::new();
        let err = seed_categories(&store, &dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[tokio::test]
    async fn server_stops_when_signal_fires() {
        let handle = Handle::<SocketAddr>::new();
        let app = Router::new().route("/", get(|| async { "ok" }));
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let server = tokio::spawn(
            axum_server::bind(addr)
                .handle(handle.clone())
                .serve(app.into_make_service()),
        );
        assert!(handle.listening().await.is_some());

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(shutdown_on(handle, async {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();

        let finished = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server shut down in time");
        assert!(finished.unwrap().is_ok());
    }
}
