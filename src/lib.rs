// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Coffee Shop API - drink catalog with permission-gated endpoints
//!
//! Reads are public. Writes and the detailed listing require an RS256 bearer
//! token from the configured identity provider whose `permissions` claim
//! carries the route's permission string.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification and permission checks (JWKS)
//! - `config` - Environment-driven settings
//! - `store` - In-memory drink catalog

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
