// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for owned records.
//!
//! Services load a record by id and then compare its owner with the caller.
//! Ownership is never folded into the lookup query, so a foreign record is
//! reported as `PermissionDenied` rather than `NotFound`.

use crate::auth::Identity;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Resource name used in errors ("wallet", "category").
    const RESOURCE: &'static str;

    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the caller owns this resource.
    ///
    /// # Errors
    /// Returns `StorageError::PermissionDenied` if the caller doesn't own the resource.
    fn verify_ownership(&self, caller: &Identity) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, caller: &Identity) -> StorageResult<()> {
        if self.owner_user_id() == caller.user_id() {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: caller.user_id().to_string(),
                resource: T::RESOURCE,
            })
        }
    }
}

/// Extension trait turning a lookup result into an owner-checked record.
pub trait OwnershipCheck<T> {
    /// Verify ownership and return the resource if authorized.
    fn verify_owner(self, caller: &Identity) -> StorageResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for StorageResult<T> {
    fn verify_owner(self, caller: &Identity) -> StorageResult<T> {
        let resource = self?;
        resource.verify_ownership(caller)?;
        Ok(resource)
    }
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn verify_owner(self, caller: &Identity) -> StorageResult<T> {
        match self {
            Some(resource) => {
                resource.verify_ownership(caller)?;
                Ok(resource)
            }
            None => Err(StorageError::NotFound {
                resource: T::RESOURCE,
            }),
        }
    }
}
