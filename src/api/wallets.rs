// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet management API endpoints.
//!
//! CRUD requires authentication and enforces ownership. The currency and
//! wallet type catalogs are public.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::RequestContext,
    domain::WalletType,
    error::ApiError,
    models::{CurrenciesResponse, MessageResponse, TypeOption, WalletRequest, WalletResponse},
    state::AppState,
};

use super::extract::ValidJson;

/// List all wallets owned by the authenticated user.
#[utoipa::path(
    get,
    path = "/wallets",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wallets owned by the caller", body = Vec<WalletResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_wallets(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<WalletResponse>>, ApiError> {
    let wallets = state.wallets.list(&ctx)?;
    Ok(Json(wallets.into_iter().map(WalletResponse::from).collect()))
}

/// Create a new wallet for the authenticated user.
#[utoipa::path(
    post,
    path = "/wallets",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    request_body = WalletRequest,
    responses(
        (status = 200, description = "Wallet created successfully", body = MessageResponse),
        (status = 400, description = "Validation failed, invalid type or currency"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Wallet name already in use")
    )
)]
pub async fn create_wallet(
    ctx: RequestContext,
    State(state): State<AppState>,
    ValidJson(request): ValidJson<WalletRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = request.validate()?;
    state.wallets.create(&ctx, input)?;
    Ok(Json(MessageResponse::new("Wallet created successfully")))
}

/// Get a specific wallet by ID.
///
/// Returns 403 if the wallet exists but belongs to another user.
#[utoipa::path(
    get,
    path = "/wallets/{id}",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Wallet ID")),
    responses(
        (status = 200, description = "Wallet", body = WalletResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn get_wallet(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = state.wallets.get(&ctx, &id)?;
    Ok(Json(wallet.into()))
}

#[utoipa::path(
    put,
    path = "/wallets/{id}",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Wallet ID")),
    request_body = WalletRequest,
    responses(
        (status = 200, description = "Wallet updated successfully", body = MessageResponse),
        (status = 400, description = "Validation failed, invalid type or currency"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Wallet not found"),
        (status = 409, description = "Wallet name already in use")
    )
)]
pub async fn update_wallet(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<WalletRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = request.validate()?;
    state.wallets.update(&ctx, &id, input)?;
    Ok(Json(MessageResponse::new("Wallet updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/wallets/{id}",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Wallet ID")),
    responses(
        (status = 200, description = "Wallet deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn delete_wallet(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.wallets.delete(&ctx, &id)?;
    Ok(Json(MessageResponse::new("Wallet deleted successfully")))
}

/// Supported currency codes.
#[utoipa::path(
    get,
    path = "/wallets/currencies",
    tag = "Wallets",
    responses((status = 200, description = "Fiat and crypto codes", body = CurrenciesResponse))
)]
pub async fn currencies() -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse::catalog())
}

/// Wallet type catalog.
#[utoipa::path(
    get,
    path = "/wallets/types",
    tag = "Wallets",
    responses((status = 200, description = "Known wallet types", body = Vec<TypeOption>))
)]
pub async fn wallet_types() -> Json<Vec<TypeOption>> {
    Json(WalletType::ALL.into_iter().map(TypeOption::from).collect())
}
