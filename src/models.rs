// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. Request types keep every
//! field optional so that a missing field yields a field-specific message
//! instead of a generic decode failure; `validate` turns them into service
//! inputs.
//!
//! ## Model Categories
//!
//! - **Users**: registration, profile, login
//! - **Categories**: income/expense/investment buckets
//! - **Wallets**: accounts with a balance and currency

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CategoryType, Currency, WalletType};
use crate::error::ApiError;
use crate::services::{CategoryInput, NewUser, UserUpdate, WalletInput};
use crate::storage::{Category, User, Wallet};

/// Minimum length (in characters) for names.
pub const NAME_MIN: usize = 2;
/// Maximum length (in characters) for names and emails.
pub const NAME_MAX: usize = 255;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Trim and length-check a required text field.
fn required_text(
    value: Option<String>,
    label: &str,
    min: usize,
    max: usize,
) -> Result<String, ApiError> {
    let value = value.unwrap_or_default().trim().to_string();
    let length = value.chars().count();
    if length == 0 {
        return Err(ApiError::bad_request(format!("{label} is required")));
    }
    if length < min {
        return Err(ApiError::bad_request(format!(
            "{label} must be at least {min} characters long"
        )));
    }
    if length > max {
        return Err(ApiError::bad_request(format!(
            "{label} must not exceed {max} characters"
        )));
    }
    Ok(value)
}

fn required<T>(value: Option<T>, message: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(message))
}

fn valid_email(value: Option<String>) -> Result<String, ApiError> {
    let email = value.unwrap_or_default().trim().to_string();
    if email.is_empty() {
        return Err(ApiError::bad_request("Email address is required"));
    }
    if email.chars().count() > NAME_MAX {
        return Err(ApiError::bad_request(
            "Email address must not exceed 255 characters",
        ));
    }
    if !email_regex().is_match(&email) {
        return Err(ApiError::bad_request("Invalid email address format"));
    }
    Ok(email)
}

// =============================================================================
// Shared
// =============================================================================

/// Confirmation returned by mutating endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Integer code and display name of an enumeration member.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TypeOption {
    pub value: i32,
    pub name: String,
}

// =============================================================================
// Users
// =============================================================================

/// Registration and profile update body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Required at registration, ignored on update.
    pub password: Option<String>,
}

impl UserRequest {
    pub fn validate_registration(self) -> Result<NewUser, ApiError> {
        let first_name = required_text(self.first_name, "First name", NAME_MIN, NAME_MAX)?;
        let last_name = required_text(self.last_name, "Last name", NAME_MIN, NAME_MAX)?;
        let email = valid_email(self.email)?;

        let password = self.password.unwrap_or_default();
        let length = password.chars().count();
        if length == 0 {
            return Err(ApiError::bad_request("Password is required"));
        }
        if length < PASSWORD_MIN {
            return Err(ApiError::bad_request(
                "Password must be at least 8 characters long",
            ));
        }
        if length > NAME_MAX {
            return Err(ApiError::bad_request(
                "Password must not exceed 255 characters",
            ));
        }

        Ok(NewUser {
            first_name,
            last_name,
            email,
            password,
        })
    }

    pub fn validate_update(self) -> Result<UserUpdate, ApiError> {
        Ok(UserUpdate {
            first_name: required_text(self.first_name, "First name", NAME_MIN, NAME_MAX)?,
            last_name: required_text(self.last_name, "Last name", NAME_MIN, NAME_MAX)?,
            email: valid_email(self.email)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: Option<String>,
    /// 0 = Expense, 1 = Income, 2 = Investment
    #[serde(rename = "type")]
    pub category_type: Option<i32>,
}

impl CategoryRequest {
    pub fn validate(self) -> Result<CategoryInput, ApiError> {
        Ok(CategoryInput {
            name: required_text(self.name, "Category name", NAME_MIN, NAME_MAX)?,
            category_type: required(self.category_type, "Category type is required")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: i32,
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            category_type: category.category_type.code(),
            type_name: category.category_type.name().to_string(),
            created_at: category.audit.created_at,
            updated_at: category.audit.modified_at,
            created_by: category.audit.created_by,
            updated_by: category.audit.modified_by,
        }
    }
}

impl From<CategoryType> for TypeOption {
    fn from(kind: CategoryType) -> Self {
        Self {
            value: kind.code(),
            name: kind.name().to_string(),
        }
    }
}

// =============================================================================
// Wallets
// =============================================================================

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WalletRequest {
    pub name: Option<String>,
    /// 0 = Bank, 1 = Cash, 2 = CreditCard, 3 = DebitCard, 4 = Savings,
    /// 5 = Investment, 6 = Other
    #[serde(rename = "type")]
    pub wallet_type: Option<i32>,
    pub balance: Option<f64>,
    /// ISO-style code, case-sensitive (e.g. `USD`, `BTC`)
    pub currency: Option<String>,
}

impl WalletRequest {
    pub fn validate(self) -> Result<WalletInput, ApiError> {
        Ok(WalletInput {
            name: required_text(self.name, "Wallet name", NAME_MIN, NAME_MAX)?,
            wallet_type: required(self.wallet_type, "Wallet type is required")?,
            balance: required(self.balance, "Balance is required")?,
            currency: self
                .currency
                .filter(|code| !code.is_empty())
                .ok_or_else(|| ApiError::bad_request("Currency is required"))?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalletResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub wallet_type: i32,
    pub type_name: String,
    pub balance: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            name: wallet.name,
            wallet_type: wallet.wallet_type.code(),
            type_name: wallet.wallet_type.name().to_string(),
            balance: wallet.balance,
            currency: wallet.currency.code().to_string(),
            created_at: wallet.audit.created_at,
            updated_at: wallet.audit.modified_at,
            created_by: wallet.audit.created_by,
            updated_by: wallet.audit.modified_by,
        }
    }
}

impl From<WalletType> for TypeOption {
    fn from(kind: WalletType) -> Self {
        Self {
            value: kind.code(),
            name: kind.name().to_string(),
        }
    }
}

/// Supported currency codes, split by kind.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrenciesResponse {
    pub fiat: Vec<String>,
    pub crypto: Vec<String>,
}

impl CurrenciesResponse {
    pub fn catalog() -> Self {
        Self {
            fiat: Currency::FIAT.iter().map(|c| c.code().to_string()).collect(),
            crypto: Currency::CRYPTO.iter().map(|c| c.code().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> UserRequest {
        UserRequest {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            password: Some("analytical".into()),
        }
    }

    #[test]
    fn registration_accepts_valid_payload() {
        let user = registration().validate_registration().unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn registration_messages() {
        let mut req = registration();
        req.first_name = Some("  ".into());
        assert_eq!(req.validate_registration().unwrap_err().message, "First name is required");

        let mut req = registration();
        req.last_name = Some("L".into());
        assert_eq!(
            req.validate_registration().unwrap_err().message,
            "Last name must be at least 2 characters long"
        );

        let mut req = registration();
        req.email = Some("not-an-email".into());
        assert_eq!(
            req.validate_registration().unwrap_err().message,
            "Invalid email address format"
        );

        let mut req = registration();
        req.password = Some("short".into());
        assert_eq!(
            req.validate_registration().unwrap_err().message,
            "Password must be at least 8 characters long"
        );

        let mut req = registration();
        req.password = None;
        assert_eq!(req.validate_registration().unwrap_err().message, "Password is required");
    }

    #[test]
    fn names_are_trimmed_and_bounded() {
        let input = CategoryRequest {
            name: Some("  Groceries  ".into()),
            category_type: Some(0),
        }
        .validate()
        .unwrap();
        assert_eq!(input.name, "Groceries");

        let err = CategoryRequest {
            name: Some("x".repeat(256)),
            category_type: Some(0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message, "Category name must not exceed 255 characters");
    }

    #[test]
    fn category_type_is_required_but_not_range_checked() {
        let err = CategoryRequest {
            name: Some("Food".into()),
            category_type: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message, "Category type is required");

        let input = CategoryRequest {
            name: Some("Food".into()),
            category_type: Some(99),
        }
        .validate()
        .unwrap();
        assert_eq!(input.category_type, 99);
    }

    #[test]
    fn wallet_required_fields() {
        let complete = || WalletRequest {
            name: Some("Main".into()),
            wallet_type: Some(0),
            balance: Some(10.0),
            currency: Some("USD".into()),
        };

        let mut req = complete();
        req.wallet_type = None;
        assert_eq!(req.validate().unwrap_err().message, "Wallet type is required");

        let mut req = complete();
        req.balance = None;
        assert_eq!(req.validate().unwrap_err().message, "Balance is required");

        let mut req = complete();
        req.currency = Some(String::new());
        assert_eq!(req.validate().unwrap_err().message, "Currency is required");

        let mut req = complete();
        req.name = Some("M".into());
        assert_eq!(
            req.validate().unwrap_err().message,
            "Wallet name must be at least 2 characters long"
        );

        assert!(complete().validate().is_ok());
    }

    #[test]
    fn wallet_response_carries_type_name_and_code() {
        let wallet = Wallet::new("u1", "Main", WalletType::CreditCard, 5.0, Currency::Gbp, "system");
        let response = WalletResponse::from(wallet);
        assert_eq!(response.wallet_type, 2);
        assert_eq!(response.type_name, "CreditCard");
        assert_eq!(response.currency, "GBP");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], 2);
        assert_eq!(json["updated_by"], "system");
    }

    #[test]
    fn currency_catalog_lists_both_kinds() {
        let catalog = CurrenciesResponse::catalog();
        assert!(catalog.fiat.contains(&"ARS".to_string()));
        assert!(catalog.crypto.contains(&"NEXO".to_string()));
        assert!(!catalog.fiat.contains(&"BTC".to_string()));
    }
}
