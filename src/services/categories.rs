// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::RequestContext;
use crate::domain::CategoryType;
use crate::storage::{Category, CategoryRepository, OwnershipCheck};

use super::error::{access_error, conflict_error};
use super::{caller, ServiceError, ServiceResult};

const INVALID_TYPE: &str =
    "Invalid category type. Must be 0 (Expense), 1 (Income), or 2 (Investment)";
const NOT_FOUND: &str = "Category not found";
const DUPLICATE_NAME: &str = "A category with this name already exists";
const FORBIDDEN_ACCESS: &str = "You do not have permission to access this category";
const FORBIDDEN_UPDATE: &str = "You do not have permission to update this category";
const FORBIDDEN_DELETE: &str = "You do not have permission to delete this category";

/// Validated-shape category payload; `category_type` is still a raw code.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub category_type: i32,
}

fn parse_type(code: i32) -> ServiceResult<CategoryType> {
    CategoryType::try_from(code).map_err(|_| ServiceError::InvalidType(INVALID_TYPE))
}

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    system_user: String,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>, system_user: impl Into<String>) -> Self {
        Self {
            repo,
            system_user: system_user.into(),
        }
    }

    pub fn create(&self, ctx: &RequestContext, input: CategoryInput) -> ServiceResult<Category> {
        let caller = caller(ctx)?;
        let category_type = parse_type(input.category_type)?;

        let category = Category::new(
            caller.user_id(),
            &input.name,
            category_type,
            &self.system_user,
        );
        self.repo
            .create(&category)
            .map_err(|e| conflict_error(e, DUPLICATE_NAME))?;

        tracing::info!(category_id = %category.id, user_id = %caller.user_id(), "category created");
        Ok(category)
    }

    pub fn get(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Category> {
        let caller = caller(ctx)?;
        self.repo
            .get_by_id(id)?
            .verify_owner(caller)
            .map_err(|e| access_error(e, NOT_FOUND, FORBIDDEN_ACCESS))
    }

    pub fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<Category>> {
        let caller = caller(ctx)?;
        Ok(self.repo.list_by_owner(caller.user_id())?)
    }

    pub fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: CategoryInput,
    ) -> ServiceResult<Category> {
        let caller = caller(ctx)?;
        let mut category = self
            .repo
            .get_by_id(id)?
            .verify_owner(caller)
            .map_err(|e| access_error(e, NOT_FOUND, FORBIDDEN_UPDATE))?;

        category.category_type = parse_type(input.category_type)?;
        category.name = input.name;
        category.audit.touch(&self.system_user);

        self.repo
            .update(&category)
            .map_err(|e| conflict_error(e, DUPLICATE_NAME))?;

        tracing::info!(category_id = %category.id, user_id = %caller.user_id(), "category updated");
        Ok(category)
    }

    pub fn delete(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        let caller = caller(ctx)?;
        self.repo
            .get_by_id(id)?
            .verify_owner(caller)
            .map_err(|e| access_error(e, NOT_FOUND, FORBIDDEN_DELETE))?;

        self.repo
            .delete(id)
            .map_err(|e| access_error(e, NOT_FOUND, FORBIDDEN_DELETE))?;

        tracing::info!(category_id = %id, user_id = %caller.user_id(), "category deleted");
        Ok(())
    }
}
