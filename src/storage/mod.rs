// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent records in an embedded redb database.
//!
//! ## Layout
//!
//! ```text
//! $DATA_DIR/finflow.redb
//!   users, user_emails, user_auth_ids
//!   categories, category_names
//!   wallets, wallet_names
//! ```
//!
//! ## Rules
//!
//! - Records are stored as JSON under their UUID
//! - Uniqueness is enforced inside the write transaction that stores the record
//! - Storage never filters by caller; ownership is checked by the services
//!   through [`ownership`]

pub mod database;
pub mod ownership;
pub mod repository;

pub use database::{Database, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipCheck, OwnershipEnforcer};
pub use repository::{
    Category, CategoryRepository, User, UserRepository, Wallet, WalletRepository,
};
