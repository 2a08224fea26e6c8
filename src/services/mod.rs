// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Resource Services
//!
//! Business rules between the HTTP handlers and the repositories.
//!
//! Owned resources (categories, wallets) follow one access sequence:
//!
//! 1. resolve the caller from [`RequestContext`] (`Unauthenticated` if absent)
//! 2. load the record by id (`NotFound` if absent)
//! 3. compare its owner with the caller (`Forbidden` if different)
//!
//! Enumerations (category/wallet type, currency) are validated here so that
//! every entry point gets the same `InvalidType` / `InvalidCurrency` errors.

pub mod auth;
pub mod categories;
pub mod error;
pub mod users;
pub mod wallets;

pub use auth::{AuthService, LoginResult};
pub use categories::{CategoryInput, CategoryService};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use users::{NewUser, UserService, UserUpdate};
pub use wallets::{WalletInput, WalletService};

use crate::auth::{Identity, RequestContext};

/// The authenticated caller, or `Unauthenticated`.
pub(crate) fn caller(ctx: &RequestContext) -> ServiceResult<&Identity> {
    ctx.identity().ok_or(ServiceError::Unauthenticated)
}
