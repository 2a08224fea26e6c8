// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User accounts.
//!
//! Users are not owned records: a caller may read, update or delete only the
//! account whose id equals its own identity. The id comparison happens before
//! any lookup, so probing someone else's id yields `Forbidden` whether or not
//! it exists.

use std::sync::Arc;

use crate::auth::{hash_secret, ExternalClaims, RequestContext};
use crate::storage::{StorageError, User, UserRepository};

use super::error::conflict_error;
use super::{caller, ServiceError, ServiceResult};

const NOT_FOUND: &str = "User not found";
const DUPLICATE_EMAIL: &str = "An account with this email address already exists";
const FORBIDDEN_VIEW: &str = "You can only view your own profile";
const FORBIDDEN_UPDATE: &str = "You can only update your own profile";
const FORBIDDEN_DELETE: &str = "You can only delete your own account";

/// Registration payload.
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile fields a user may change.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    system_user: String,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, system_user: impl Into<String>) -> Self {
        Self {
            repo,
            system_user: system_user.into(),
        }
    }

    /// Register a password account. Open to anonymous callers.
    pub fn create(&self, input: NewUser) -> ServiceResult<User> {
        let digest = hash_secret(&input.password)?;
        let user = User::new(
            &input.first_name,
            &input.last_name,
            &input.email,
            digest,
            &self.system_user,
        );
        self.repo
            .create(&user)
            .map_err(|e| conflict_error(e, DUPLICATE_EMAIL))?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    pub fn get(&self, ctx: &RequestContext, id: &str) -> ServiceResult<User> {
        self.authorize_self(ctx, id, FORBIDDEN_VIEW)?;
        self.repo
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }

    pub fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<User>> {
        caller(ctx)?;
        Ok(self.repo.list()?)
    }

    pub fn update(&self, ctx: &RequestContext, id: &str, input: UserUpdate) -> ServiceResult<User> {
        self.authorize_self(ctx, id, FORBIDDEN_UPDATE)?;
        let mut user = self
            .repo
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound(NOT_FOUND))?;

        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.email = input.email;
        user.audit.touch(&self.system_user);

        self.repo.update(&user).map_err(|e| match e {
            StorageError::NotFound { .. } => ServiceError::NotFound(NOT_FOUND),
            other => conflict_error(other, DUPLICATE_EMAIL),
        })?;

        tracing::info!(user_id = %user.id, "user profile updated");
        Ok(user)
    }

    pub fn delete(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        self.authorize_self(ctx, id, FORBIDDEN_DELETE)?;
        self.repo.delete(id).map_err(|e| match e {
            StorageError::NotFound { .. } => ServiceError::NotFound(NOT_FOUND),
            other => ServiceError::Storage(other),
        })?;

        tracing::info!(user_id = %id, "user account deleted");
        Ok(())
    }

    /// Return the user linked to an upstream identity, creating it on first
    /// sight. Synced accounts have no password and cannot log in with one.
    pub fn sync_by_auth_id(&self, claims: &ExternalClaims) -> ServiceResult<User> {
        if let Some(user) = self.repo.get_by_auth_id(&claims.auth_id)? {
            return Ok(user);
        }

        let mut user = User::new(
            &claims.first_name,
            &claims.last_name,
            &claims.email,
            String::new(),
            &self.system_user,
        );
        user.auth_id = Some(claims.auth_id.clone());

        match self.repo.create(&user) {
            Ok(()) => {
                tracing::info!(user_id = %user.id, auth_id = %claims.auth_id, "user synced");
                Ok(user)
            }
            Err(StorageError::Conflict { .. }) => {
                // A concurrent sync may have linked the same auth id first.
                self.repo
                    .get_by_auth_id(&claims.auth_id)?
                    .ok_or(ServiceError::Conflict(DUPLICATE_EMAIL))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn authorize_self(
        &self,
        ctx: &RequestContext,
        id: &str,
        forbidden: &'static str,
    ) -> ServiceResult<()> {
        if caller(ctx)?.user_id() == id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(forbidden))
        }
    }
}
