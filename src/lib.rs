// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Toy Master - toy marketplace backend
//!
//! CRUD over a toys collection plus a read-only categories collection.
//! Sellers obtain an HS384 token from `/generate-jwt-token` and present it as
//! a bearer token to list their own toys.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `auth` - Token issuance, verification, and the bearer middleware
//! - `server` - Startup wiring (store selection, seeding, shutdown)
//! - `storage` - Toy and category stores (in-memory or redb)
//! - `telemetry` - tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod state;
pub mod storage;
pub mod telemetry;
