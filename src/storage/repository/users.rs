// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User records.
//!
//! Users are indexed by email (case-insensitive) and by the optional external
//! auth id assigned by the upstream identity provider. Both indexes are
//! unique.

use std::fmt;

use redb::ReadableTable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AuditFields;

use super::super::database::{read_index, read_record, USERS, USER_AUTH_IDS, USER_EMAILS};
use super::super::{Database, StorageError, StorageResult};

/// Persisted user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub auth_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2id PHC digest. Empty for accounts created through sync.
    pub password_hash: String,
    pub audit: AuditFields,
}

impl User {
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: String,
        actor: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            auth_id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash,
            audit: AuditFields::new(actor),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("auth_id", &self.auth_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn email_key(email: &str) -> Option<String> {
    let key = email.trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

/// Persistence operations for users.
pub trait UserRepository: Send + Sync {
    fn create(&self, user: &User) -> StorageResult<()>;
    fn get_by_id(&self, id: &str) -> StorageResult<Option<User>>;
    fn get_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    fn get_by_auth_id(&self, auth_id: &str) -> StorageResult<Option<User>>;
    fn list(&self) -> StorageResult<Vec<User>>;
    fn update(&self, user: &User) -> StorageResult<()>;
    fn delete(&self, id: &str) -> StorageResult<()>;
}

impl UserRepository for Database {
    fn create(&self, user: &User) -> StorageResult<()> {
        let json = serde_json::to_vec(user)?;

        let write_txn = self.begin_write()?;
        {
            if let Some(key) = email_key(&user.email) {
                let mut emails = write_txn.open_table(USER_EMAILS)?;
                if emails.get(key.as_str())?.is_some() {
                    return Err(StorageError::Conflict {
                        resource: "user",
                        key: user.email.clone(),
                    });
                }
                emails.insert(key.as_str(), user.id.as_str())?;
            }

            if let Some(auth_id) = user.auth_id.as_deref() {
                let mut auth_ids = write_txn.open_table(USER_AUTH_IDS)?;
                if auth_ids.get(auth_id)?.is_some() {
                    return Err(StorageError::Conflict {
                        resource: "user",
                        key: auth_id.to_string(),
                    });
                }
                auth_ids.insert(auth_id, user.id.as_str())?;
            }

            let mut users = write_txn.open_table(USERS)?;
            users.insert(user.id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Option<User>> {
        self.get(USERS, id)
    }

    fn get_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let Some(key) = email_key(email) else {
            return Ok(None);
        };
        match self.lookup(USER_EMAILS, &key)? {
            Some(id) => self.get(USERS, &id),
            None => Ok(None),
        }
    }

    fn get_by_auth_id(&self, auth_id: &str) -> StorageResult<Option<User>> {
        match self.lookup(USER_AUTH_IDS, auth_id)? {
            Some(id) => self.get(USERS, &id),
            None => Ok(None),
        }
    }

    fn list(&self) -> StorageResult<Vec<User>> {
        let mut users: Vec<User> = self.scan(USERS)?;
        users.sort_by(|a, b| b.audit.created_at.cmp(&a.audit.created_at));
        Ok(users)
    }

    fn update(&self, user: &User) -> StorageResult<()> {
        let json = serde_json::to_vec(user)?;

        let write_txn = self.begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let existing: User = read_record(&users, &user.id)?
                .ok_or(StorageError::NotFound { resource: "user" })?;

            let old_email = email_key(&existing.email);
            let new_email = email_key(&user.email);
            if old_email != new_email {
                let mut emails = write_txn.open_table(USER_EMAILS)?;
                if let Some(key) = new_email.as_deref() {
                    if read_index(&emails, key)?.is_some() {
                        return Err(StorageError::Conflict {
                            resource: "user",
                            key: user.email.clone(),
                        });
                    }
                    emails.insert(key, user.id.as_str())?;
                }
                if let Some(key) = old_email.as_deref() {
                    emails.remove(key)?;
                }
            }

            if existing.auth_id != user.auth_id {
                let mut auth_ids = write_txn.open_table(USER_AUTH_IDS)?;
                if let Some(auth_id) = user.auth_id.as_deref() {
                    if read_index(&auth_ids, auth_id)?.is_some() {
                        return Err(StorageError::Conflict {
                            resource: "user",
                            key: auth_id.to_string(),
                        });
                    }
                    auth_ids.insert(auth_id, user.id.as_str())?;
                }
                if let Some(auth_id) = existing.auth_id.as_deref() {
                    auth_ids.remove(auth_id)?;
                }
            }

            users.insert(user.id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let existing: User =
                read_record(&users, id)?.ok_or(StorageError::NotFound { resource: "user" })?;

            if let Some(key) = email_key(&existing.email) {
                write_txn.open_table(USER_EMAILS)?.remove(key.as_str())?;
            }
            if let Some(auth_id) = existing.auth_id.as_deref() {
                write_txn.open_table(USER_AUTH_IDS)?.remove(auth_id)?;
            }
            users.remove(id)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
