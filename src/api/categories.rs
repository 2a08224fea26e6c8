// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Category endpoints.
//!
//! Everything except the type catalog requires a bearer token. Reads and
//! writes on a single category are refused with 403 when the caller is not
//! its owner.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::RequestContext,
    domain::CategoryType,
    error::ApiError,
    models::{CategoryRequest, CategoryResponse, MessageResponse, TypeOption},
    state::AppState,
};

use super::extract::ValidJson;

/// List the caller's categories, newest first.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Categories owned by the caller", body = Vec<CategoryResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_categories(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.categories.list(&ctx)?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category created successfully", body = MessageResponse),
        (status = 400, description = "Validation failed or invalid category type"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Category name already in use")
    )
)]
pub async fn create_category(
    ctx: RequestContext,
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CategoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = request.validate()?;
    state.categories.create(&ctx, input)?;
    Ok(Json(MessageResponse::new("Category created successfully")))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.categories.get(&ctx, &id)?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = MessageResponse),
        (status = 400, description = "Validation failed or invalid category type"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already in use")
    )
)]
pub async fn update_category(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<CategoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = request.validate()?;
    state.categories.update(&ctx, &id, input)?;
    Ok(Json(MessageResponse::new("Category updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.categories.delete(&ctx, &id)?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

/// Category type catalog. Public.
#[utoipa::path(
    get,
    path = "/categories/types",
    tag = "Categories",
    responses((status = 200, description = "Known category types", body = Vec<TypeOption>))
)]
pub async fn category_types() -> Json<Vec<TypeOption>> {
    Json(CategoryType::ALL.into_iter().map(TypeOption::from).collect())
}
