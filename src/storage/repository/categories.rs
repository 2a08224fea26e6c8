// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AuditFields, CategoryType};

use super::super::database::{NamedRecord, CATEGORIES, CATEGORY_NAMES};
use super::super::{Database, OwnedResource, StorageResult};

/// Persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub audit: AuditFields,
}

impl Category {
    pub fn new(owner_user_id: &str, name: &str, category_type: CategoryType, actor: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_user_id: owner_user_id.to_string(),
            name: name.to_string(),
            category_type,
            audit: AuditFields::new(actor),
        }
    }
}

impl OwnedResource for Category {
    const RESOURCE: &'static str = "category";

    fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }
}

impl NamedRecord for Category {
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

/// Persistence operations for categories.
///
/// Names are unique per owner; a clash is `StorageError::Conflict`.
pub trait CategoryRepository: Send + Sync {
    fn create(&self, category: &Category) -> StorageResult<()>;
    fn get_by_id(&self, id: &str) -> StorageResult<Option<Category>>;
    /// Newest first.
    fn list_by_owner(&self, owner_user_id: &str) -> StorageResult<Vec<Category>>;
    fn update(&self, category: &Category) -> StorageResult<()>;
    fn delete(&self, id: &str) -> StorageResult<()>;
}

impl CategoryRepository for Database {
    fn create(&self, category: &Category) -> StorageResult<()> {
        self.insert_named(CATEGORIES, CATEGORY_NAMES, category)
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Option<Category>> {
        self.get(CATEGORIES, id)
    }

    fn list_by_owner(&self, owner_user_id: &str) -> StorageResult<Vec<Category>> {
        self.list_named(CATEGORIES, owner_user_id)
    }

    fn update(&self, category: &Category) -> StorageResult<()> {
        self.update_named(CATEGORIES, CATEGORY_NAMES, category)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        self.delete_named::<Category>(CATEGORIES, CATEGORY_NAMES, id)
    }
}
