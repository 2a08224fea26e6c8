// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

use super::extract::ValidJson;

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Failed to generate token")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Argon2 verification is CPU-bound; keep it off the async workers.
    let auth = state.auth.clone();
    let result = tokio::task::spawn_blocking(move || auth.login(&request.email, &request.password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "login task failed");
            ApiError::internal()
        })??;

    Ok(Json(LoginResponse {
        token: result.token,
        user: result.user.into(),
    }))
}
