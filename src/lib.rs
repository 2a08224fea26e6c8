// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! FinFlow API - personal finance record-keeping service.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers, routing and OpenAPI document (Axum, utoipa)
//! - `auth` - Bearer-token verification, request identity, password hashing
//! - `domain` - Category/wallet type and currency enumerations, audit fields
//! - `services` - Use cases with ownership and self-only checks
//! - `storage` - Embedded redb database and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod telemetry;
