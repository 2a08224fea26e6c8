// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain Vocabulary
//!
//! Closed enumerations and record metadata shared by storage, services and
//! the HTTP layer.
//!
//! - [`CategoryType`]: Expense, Income, Investment
//! - [`WalletType`]: Bank through Other
//! - [`Currency`]: the fiat and crypto codes a wallet may hold
//! - [`AuditFields`]: creation/modification stamps carried by every record

pub mod audit;
pub mod category;
pub mod wallet;

pub use audit::AuditFields;
pub use category::CategoryType;
pub use wallet::{Currency, WalletType};

/// An integer or code that does not name a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: impl ToString) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
