// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::services::{AuthService, CategoryService, UserService, WalletService};
use crate::storage::Database;

/// Shared handler state. Cheap to clone; everything behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub categories: Arc<CategoryService>,
    pub wallets: Arc<WalletService>,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService, system_user: &str) -> Self {
        let db = Arc::new(db);
        let tokens = Arc::new(tokens);

        Self {
            auth: Arc::new(AuthService::new(db.clone(), tokens.clone())),
            users: Arc::new(UserService::new(db.clone(), system_user)),
            categories: Arc::new(CategoryService::new(db.clone(), system_user)),
            wallets: Arc::new(WalletService::new(db.clone(), system_user)),
            db,
            tokens,
        }
    }

    pub fn from_config(config: &AppConfig, db: Database) -> Self {
        Self::new(
            db,
            TokenService::new(&config.jwt_secret, config.jwt_ttl),
            &config.system_user,
        )
    }

    /// In-memory state with a fixed test secret.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let db = Database::in_memory().expect("in-memory database");
        Self::new(
            db,
            TokenService::new("test-secret", std::time::Duration::from_secs(3600)),
            "system",
        )
    }
}
