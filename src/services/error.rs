// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Service-layer error taxonomy.
//!
//! Every [`ServiceError`] reports an [`ErrorKind`]; the HTTP layer maps kinds
//! to status codes and never inspects message text.

use crate::auth::{CredentialError, TokenError};
use crate::storage::StorageError;

/// Coarse classification driving the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    InvalidInput,
    Conflict,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidType(&'static str),

    #[error("Invalid currency code")]
    InvalidCurrency,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Failed to generate token")]
    TokenIssue(#[source] TokenError),

    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Unauthenticated | ServiceError::InvalidCredentials => {
                ErrorKind::Unauthenticated
            }
            ServiceError::Forbidden(_) => ErrorKind::Forbidden,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::InvalidInput(_)
            | ServiceError::InvalidType(_)
            | ServiceError::InvalidCurrency => ErrorKind::InvalidInput,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::TokenIssue(_) | ServiceError::Credential(_) => ErrorKind::Internal,
            ServiceError::Storage(e) => match e {
                StorageError::NotFound { .. } => ErrorKind::NotFound,
                StorageError::Conflict { .. } => ErrorKind::Conflict,
                StorageError::PermissionDenied { .. } => ErrorKind::Forbidden,
                _ => ErrorKind::Internal,
            },
        }
    }

    /// Message safe to show a client.
    ///
    /// Internal failures are reported generically; their detail goes to logs.
    pub fn public_message(&self) -> String {
        match (self.kind(), self) {
            (ErrorKind::Internal, ServiceError::TokenIssue(_)) => self.to_string(),
            (ErrorKind::Internal, _) => "Internal server error".to_string(),
            (_, ServiceError::Storage(e)) => e.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Translate a failed owner-checked lookup into resource-specific messages.
pub(crate) fn access_error(
    err: StorageError,
    not_found: &'static str,
    forbidden: &'static str,
) -> ServiceError {
    match err {
        StorageError::NotFound { .. } => ServiceError::NotFound(not_found),
        StorageError::PermissionDenied { .. } => ServiceError::Forbidden(forbidden),
        other => ServiceError::Storage(other),
    }
}

/// Translate a uniqueness violation into a resource-specific message.
pub(crate) fn conflict_error(err: StorageError, conflict: &'static str) -> ServiceError {
    match err {
        StorageError::Conflict { .. } => ServiceError::Conflict(conflict),
        other => ServiceError::Storage(other),
    }
}
