// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::RequestContext;
use crate::domain::{Currency, WalletType};
use crate::storage::{OwnershipCheck, Wallet, WalletRepository};

use super::error::{access_error, conflict_error};
use super::{caller, ServiceError, ServiceResult};

const INVALID_TYPE: &str = "Invalid wallet type. Must be 0 (Bank), 1 (Cash), 2 (CreditCard), \
     3 (DebitCard), 4 (Savings), 5 (Investment), or 6 (Other)";
const NOT_FOUND: &str = "Wallet not found";
const DUPLICATE_NAME: &str = "A wallet with this name already exists";
const FORBIDDEN_ACCESS: &str = "You do not have permission to access this wallet";
const FORBIDDEN_UPDATE: &str = "You do not have permission to update this wallet";
const FORBIDDEN_DELETE: &str = "You do not have permission to delete this wallet";

/// Wallet payload with raw type and currency codes.
#[derive(Debug, Clone)]
pub struct WalletInput {
    pub name: String,
    pub wallet_type: i32,
    pub balance: f64,
    pub currency: String,
}

fn parse_enums(input: &WalletInput) -> ServiceResult<(WalletType, Currency)> {
    let wallet_type =
        WalletType::try_from(input.wallet_type).map_err(|_| ServiceError::InvalidType(INVALID_TYPE))?;
    let currency = input
        .currency
        .parse::<Currency>()
        .map_err(|_| ServiceError::InvalidCurrency)?;
    Ok((wallet_type, currency))
}

pub struct WalletService {
    repo: Arc<dyn WalletRepository>,
    system_user: String,
}

impl WalletService {
    pub fn new(repo: Arc<dyn WalletRepository>, system_user: impl Into<String>) -> Self {
        Self {
            repo,
            system_user: system_user.into(),
        }
    }

    pub fn create(&self, ctx: &RequestContext, input: WalletInput) -> ServiceResult<Wallet> {
        let caller = caller(ctx)?;
        let (wallet_type, currency) = parse_enums(&input)?;

        let wallet = Wallet::new(
            caller.user_id(),
            &input.name,
            wallet_type,
            input.balance,
            currency,
            &self.system_user,
        );
        self.repo
            .create(&wallet)
            .map_err(|e| conflict_error(e, DUPLICATE_NAME))?;

        tracing::info!(wallet_id = %wallet.id, user_id = %caller.user_id(), "wallet created");
        Ok(wallet)
    }

    pub fn get(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Wallet> {
        let caller = caller(ctx)?;
        self.repo
            .get_by_id(id)?
            .verify_owner(caller)
            .map_err(|e| access_error(e, NOT_FOUND, FORBIDDEN_ACCESS))
    }

    pub fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<Wallet>> {
        let caller = caller(ctx)?;
        Ok(self.repo.list_by_owner(caller.user_id())?)
    }

    pub fn update(&self, ctx: &RequestContext, id: &str, input: WalletInput) -> ServiceResult<Wallet> {
        let caller = caller(ctx)?;
        let mut wallet = self
            .repo
            .get_by_id(id)?
            .verify_owner(caller)
            .map_err(|e| access_error(e, NOT_FOUND, FORBIDDEN_UPDATE))?;

        let (wallet_type, currency) = parse_enums(&input)?;
        wallet.name = input.name;
        wallet.wallet_type = wallet_type;
        wallet.balance = input.balance;
        wallet.currency = currency;
        wallet.audit.touch(&self.system_user);

        self.repo
            .update(&wallet)
            .map_err(|e| conflict_error(e, DUPLICATE_NAME))?;

        tracing::info!(wallet_id = %wallet.id, user_id = %caller.user_id(), "wallet updated");
        Ok(wallet)
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

        tracing::info!(wallet_id = %id, user_id = %caller.user_id(), "wallet deleted");
        Ok(())
    }
}
