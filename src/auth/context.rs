// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped caller identity.
//!
//! Only [`require_auth`](super::require_auth) can attach an identity: the
//! extension key is private to this module, so handlers read it through
//! [`identity`] or the [`RequestContext`] extractor.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Extensions},
};

/// The authenticated caller, as named by a verified token subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone)]
struct VerifiedIdentity(Identity);

pub(crate) fn attach(extensions: &mut Extensions, identity: Identity) {
    extensions.insert(VerifiedIdentity(identity));
}

/// Identity attached by the authentication middleware, if any.
pub fn identity(extensions: &Extensions) -> Option<Identity> {
    extensions
        .get::<VerifiedIdentity>()
        .map(|verified| verified.0.clone())
}

/// Caller context handed to services.
///
/// Extraction never fails; services decide whether an anonymous caller is
/// acceptable.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            identity: identity(&parts.extensions),
        })
    }
}
