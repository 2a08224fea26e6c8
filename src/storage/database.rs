// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded record database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user id → serialized User
//! - `user_emails`: lowercase email → user id
//! - `user_auth_ids`: external auth id → user id
//! - `categories`: category id → serialized Category
//! - `category_names`: (owner, name) → category id
//! - `wallets`: wallet id → serialized Wallet
//! - `wallet_names`: (owner, name) → wallet id
//!
//! Uniqueness (email, auth id, per-owner names) is checked and claimed in the
//! same write transaction that stores the record, so concurrent writers are
//! serialized by redb rather than by the services.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{
    backends::InMemoryBackend, Builder, ReadableDatabase, ReadableTable, TableDefinition,
    WriteTransaction,
};
use serde::{de::DeserializeOwned, Serialize};

use super::OwnedResource;

// =============================================================================
// Table Definitions
// =============================================================================

pub(crate) type RecordTable = TableDefinition<'static, &'static str, &'static [u8]>;
pub(crate) type IndexTable = TableDefinition<'static, &'static str, &'static str>;
/// Keyed by `(owner_user_id, name)`.
pub(crate) type NameTable = TableDefinition<'static, (&'static str, &'static str), &'static str>;

pub(crate) const USERS: RecordTable = TableDefinition::new("users");
pub(crate) const USER_EMAILS: IndexTable = TableDefinition::new("user_emails");
pub(crate) const USER_AUTH_IDS: IndexTable = TableDefinition::new("user_auth_ids");
pub(crate) const CATEGORIES: RecordTable = TableDefinition::new("categories");
pub(crate) const CATEGORY_NAMES: NameTable = TableDefinition::new("category_names");
pub(crate) const WALLETS: RecordTable = TableDefinition::new("wallets");
pub(crate) const WALLET_NAMES: NameTable = TableDefinition::new("wallet_names");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("redb database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    Redb(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("{resource} already exists: {key}")]
    Conflict { resource: &'static str, key: String },

    #[error("permission denied: user {user_id} cannot access {resource}")]
    PermissionDenied {
        user_id: String,
        resource: &'static str,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Record Helpers
// =============================================================================

/// A record owned by one user and unique by name within that owner.
pub trait NamedRecord: OwnedResource + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

pub(crate) fn read_record<T, R>(table: &R, key: &str) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
    R: ReadableTable<&'static str, &'static [u8]>,
{
    match table.get(key)? {
        Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
        None => Ok(None),
    }
}

pub(crate) fn read_index<R>(table: &R, key: &str) -> StorageResult<Option<String>>
where
    R: ReadableTable<&'static str, &'static str>,
{
    Ok(table.get(key)?.map(|value| value.value().to_string()))
}

// =============================================================================
// Database
// =============================================================================

/// Embedded ACID record store.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(redb::Database::create(path)?)
    }

    /// Non-persistent database for tests and ephemeral runs.
    pub fn in_memory() -> StorageResult<Self> {
        Self::init(Builder::new().create_with_backend(InMemoryBackend::new())?)
    }

    fn init(db: redb::Database) -> StorageResult<Self> {
        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USER_EMAILS)?;
            let _ = write_txn.open_table(USER_AUTH_IDS)?;
            let _ = write_txn.open_table(CATEGORIES)?;
            let _ = write_txn.open_table(CATEGORY_NAMES)?;
            let _ = write_txn.open_table(WALLETS)?;
            let _ = write_txn.open_table(WALLET_NAMES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Cheap liveness probe: a read transaction can be opened.
    pub fn ping(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(USERS)?;
        Ok(())
    }

    pub(crate) fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        table: RecordTable,
        key: &str,
    ) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        read_record(&table, key)
    }

    pub(crate) fn lookup(&self, table: IndexTable, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        read_index(&table, key)
    }

    pub(crate) fn scan<T: DeserializeOwned>(&self, table: RecordTable) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    // =========================================================================
    // Owned, per-owner-unique records
    // =========================================================================

    pub(crate) fn insert_named<T: NamedRecord>(
        &self,
        records: RecordTable,
        names: NameTable,
        record: &T,
    ) -> StorageResult<()> {
        let json = serde_json::to_vec(record)?;
        let key = (record.owner_user_id(), record.name());

        let write_txn = self.begin_write()?;
        {
            let mut name_table = write_txn.open_table(names)?;
            if name_table.get(key)?.is_some() {
                return Err(StorageError::Conflict {
                    resource: T::RESOURCE,
                    key: record.name().to_string(),
                });
            }
            name_table.insert(key, record.id())?;

            let mut record_table = write_txn.open_table(records)?;
            record_table.insert(record.id(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub(crate) fn update_named<T: NamedRecord>(
        &self,
        records: RecordTable,
        names: NameTable,
        record: &T,
    ) -> StorageResult<()> {
        let json = serde_json::to_vec(record)?;

        let write_txn = self.begin_write()?;
        {
            let mut record_table = write_txn.open_table(records)?;
            let existing: T = read_record(&record_table, record.id())?
                .ok_or(StorageError::NotFound {
                    resource: T::RESOURCE,
                })?;

            let old_key = (existing.owner_user_id(), existing.name());
            let new_key = (record.owner_user_id(), record.name());
            if old_key != new_key {
                let mut name_table = write_txn.open_table(names)?;
                if name_table.get(new_key)?.is_some() {
                    return Err(StorageError::Conflict {
                        resource: T::RESOURCE,
                        key: record.name().to_string(),
                    });
                }
                name_table.remove(old_key)?;
                name_table.insert(new_key, record.id())?;
            }

            record_table.insert(record.id(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub(crate) fn delete_named<T: NamedRecord>(
        &self,
        records: RecordTable,
        names: NameTable,
        id: &str,
    ) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut record_table = write_txn.open_table(records)?;
            let existing: T = read_record(&record_table, id)?.ok_or(StorageError::NotFound {
                resource: T::RESOURCE,
            })?;

            let mut name_table = write_txn.open_table(names)?;
            name_table.remove((existing.owner_user_id(), existing.name()))?;
            record_table.remove(id)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// All records of `owner`, newest first.
    pub(crate) fn list_named<T: NamedRecord>(
        &self,
        records: RecordTable,
        owner: &str,
    ) -> StorageResult<Vec<T>> {
        let mut owned: Vec<T> = self
            .scan::<T>(records)?
            .into_iter()
            .filter(|record| record.owner_user_id() == owner)
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }
}
