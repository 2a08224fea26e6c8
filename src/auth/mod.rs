// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication and Authorization
//!
//! ## Components
//!
//! - [`credentials`]: Argon2id password digests
//! - [`token`]: HS256 token issuing and verification
//! - [`middleware`]: `require_auth`, the verified bearer-token gate
//! - [`external`]: `require_external_identity`, the unverified upstream bridge
//! - [`context`]: caller identity carried in request extensions
//!
//! ## Request Flow
//!
//! ```text
//! Authorization: Bearer <token>
//!        │
//!        ▼
//! require_auth ──► TokenService::verify ──► Identity in extensions
//!        │                                        │
//!        ▼                                        ▼
//!   401 on failure                RequestContext ──► service ownership check
//! ```
//!
//! Ownership itself is enforced in the services against persisted records
//! (see [`crate::storage::ownership`]), not here.

pub mod context;
pub mod credentials;
pub mod error;
pub mod external;
pub mod middleware;
pub mod token;

pub use context::{identity, Identity, RequestContext};
pub use credentials::{hash_secret, verify_secret, CredentialError};
pub use error::AuthError;
pub use external::{
    external_identity, require_external_identity, ExternalClaims, ExternalIdentity,
};
pub use middleware::require_auth;
pub use token::{TokenError, TokenService};
