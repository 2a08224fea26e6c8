// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User account endpoints.
//!
//! Registration is public. Profile reads and writes are restricted to the
//! caller's own account. `POST /users/sync` is served behind the external
//! identity bridge instead of bearer verification.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::{ExternalIdentity, RequestContext},
    error::ApiError,
    models::{MessageResponse, UserRequest, UserResponse},
    state::AppState,
};

use super::extract::ValidJson;

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User account created successfully", body = MessageResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<UserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = request.validate_registration()?;

    let users = state.users.clone();
    tokio::task::spawn_blocking(move || users.create(input))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "registration task failed");
            ApiError::internal()
        })??;

    Ok(Json(MessageResponse::new("User account created successfully")))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list(&ctx)?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get the caller's own profile.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the caller's profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get(&ctx, &id)?;
    Ok(Json(user.into()))
}

/// Update the caller's own profile.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User profile updated successfully", body = MessageResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the caller's profile"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<UserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = request.validate_update()?;
    state.users.update(&ctx, &id, input)?;
    Ok(Json(MessageResponse::new("User profile updated successfully")))
}

/// Delete the caller's own account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User account deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the caller's account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.delete(&ctx, &id)?;
    Ok(Json(MessageResponse::new("User account deleted successfully")))
}

/// Link (or create) the account for an upstream identity.
#[utoipa::path(
    post,
    path = "/users/sync",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Synced user", body = UserResponse),
        (status = 401, description = "Missing or undecodable token"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn sync_user(
    ExternalIdentity(claims): ExternalIdentity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.sync_by_auth_id(&claims)?;
    Ok(Json(user.into()))
}
