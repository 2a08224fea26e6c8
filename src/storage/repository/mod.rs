// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository traits and their redb implementations.
//!
//! Services depend on the traits; [`Database`](super::Database) implements
//! all three.

pub mod categories;
pub mod users;
pub mod wallets;

pub use categories::{Category, CategoryRepository};
pub use users::{User, UserRepository};
pub use wallets::{Wallet, WalletRepository};
