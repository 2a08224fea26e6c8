// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet records.
//!
//! A wallet is a user-maintained account (bank, cash, card, ...) with a
//! balance in one currency. Balances are stored as entered; this service
//! keeps no ledger behind them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AuditFields, Currency, WalletType};

use super::super::database::{NamedRecord, WALLETS, WALLET_NAMES};
use super::super::{Database, OwnedResource, StorageResult};

/// Persisted wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
    pub wallet_type: WalletType,
    pub balance: f64,
    pub currency: Currency,
    pub audit: AuditFields,
}

impl Wallet {
    pub fn new(
        owner_user_id: &str,
        name: &str,
        wallet_type: WalletType,
        balance: f64,
        currency: Currency,
        actor: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_user_id: owner_user_id.to_string(),
            name: name.to_string(),
            wallet_type,
            balance,
            currency,
            audit: AuditFields::new(actor),
        }
    }
}

impl OwnedResource for Wallet {
    const RESOURCE: &'static str = "wallet";

    fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }
}

impl NamedRecord for Wallet {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.audit.created_at
    }
}

/// Persistence operations for wallets.
pub trait WalletRepository: Send + Sync {
    fn create(&self, wallet: &Wallet) -> StorageResult<()>;
    fn get_by_id(&self, id: &str) -> StorageResult<Option<Wallet>>;
    fn list_by_owner(&self, owner_user_id: &str) -> StorageResult<Vec<Wallet>>;
    fn update(&self, wallet: &Wallet) -> StorageResult<()>;
    fn delete(&self, id: &str) -> StorageResult<()>;
}

impl WalletRepository for Database {
    fn create(&self, wallet: &Wallet) -> StorageResult<()> {
        self.insert_named(WALLETS, WALLET_NAMES, wallet)
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Option<Wallet>> {
        self.get(WALLETS, id)
    }

    fn list_by_owner(&self, owner_user_id: &str) -> StorageResult<Vec<Wallet>> {
        self.list_named(WALLETS, owner_user_id)
    }

    fn update(&self, wallet: &Wallet) -> StorageResult<()> {
        self.update_named(WALLETS, WALLET_NAMES, wallet)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        self.delete_named::<Wallet>(WALLETS, WALLET_NAMES, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn wallet(owner: &str, name: &str) -> Wallet {
        Wallet::new(owner, name, WalletType::Bank, 100.5, Currency::Usd, "system")
    }

    #[test]
    fn stored_wallet_round_trips() {
        let db = Database::in_memory().unwrap();
        let w = Wallet::new("u1", "Cold storage", WalletType::Investment, 0.25, Currency::Btc, "system");
        WalletRepository::create(&db, &w).unwrap();

        let loaded = WalletRepository::get_by_id(&db, &w.id).unwrap().unwrap();
        assert_eq!(loaded, w);
        assert_eq!(loaded.currency, Currency::Btc);
    }

    #[test]
    fn name_unique_per_owner() {
        let db = Database::in_memory().unwrap();
        WalletRepository::create(&db, &wallet("u1", "Main")).unwrap();

        assert!(matches!(
            WalletRepository::create(&db, &wallet("u1", "Main")),
            Err(StorageError::Conflict { resource: "wallet", .. })
        ));
        WalletRepository::create(&db, &wallet("u2", "Main")).unwrap();
    }

    #[test]
    fn update_persists_mutable_fields() {
        let db = Database::in_memory().unwrap();
        let mut w = wallet("u1", "Main");
        WalletRepository::create(&db, &w).unwrap();

        w.balance = 42.0;
        w.currency = Currency::Eur;
        w.audit.touch("system");
        WalletRepository::update(&db, &w).unwrap();

        let loaded = WalletRepository::get_by_id(&db, &w.id).unwrap().unwrap();
        assert_eq!(loaded.balance, 42.0);
        assert_eq!(loaded.currency, Currency::Eur);
    }

    #[test]
    fn update_missing_is_not_found() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            WalletRepository::update(&db, &wallet("u1", "Ghost")),
            Err(StorageError::NotFound { resource: "wallet" })
        ));
    }

    #[test]
    fn list_excludes_other_owners() {
        let db = Database::in_memory().unwrap();
        WalletRepository::create(&db, &wallet("u1", "A")).unwrap();
        WalletRepository::create(&db, &wallet("u2", "B")).unwrap();

        let listed = WalletRepository::list_by_owner(&db, "u1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].owner_user_id, "u1");
    }
}
