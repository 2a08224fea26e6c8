// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External identity bridge.
//!
//! Reads a bearer token minted by the upstream identity provider and exposes
//! its profile claims **without verifying the signature**. The gateway in
//! front of this service is trusted to have verified the token already, so
//! this bridge must only guard routes that are unreachable except through
//! that gateway (currently `POST /users/sync`).
//!
//! Claims land under their own extension key. They are never an
//! [`Identity`](super::Identity) and [`identity`](super::identity) will not
//! return them.

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, Extensions},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{Map, Value};

use super::middleware::bearer_token;
use super::AuthError;

/// Profile claims read from an unverified upstream token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalClaims {
    pub auth_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone)]
struct UnverifiedClaims(ExternalClaims);

/// Decode the payload segment of `token` into profile claims.
///
/// Only the payload is read; the header and signature segments are ignored.
/// Claims that are not strings are treated as absent.
pub fn decode_external_claims(token: &str) -> Result<ExternalClaims, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|_| AuthError::InvalidToken)?;
    let claims: Map<String, Value> =
        serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;

    let text = |key: &str| claims.get(key).and_then(Value::as_str).map(str::to_string);

    let auth_id = text("sub")
        .filter(|sub| !sub.is_empty())
        .ok_or(AuthError::InvalidToken)?;

    Ok(ExternalClaims {
        auth_id,
        first_name: text("first_name").or_else(|| text("given_name")).unwrap_or_default(),
        last_name: text("last_name").or_else(|| text("family_name")).unwrap_or_default(),
        email: text("email").unwrap_or_default(),
    })
}

/// Claims attached by [`require_external_identity`], if any.
pub fn external_identity(extensions: &Extensions) -> Option<ExternalClaims> {
    extensions
        .get::<UnverifiedClaims>()
        .map(|claims| claims.0.clone())
}

/// Extractor for claims attached by [`require_external_identity`].
///
/// Rejects with 401 when the bridge did not run for this request.
pub struct ExternalIdentity(pub ExternalClaims);

impl<S> FromRequestParts<S> for ExternalIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        external_identity(&parts.extensions)
            .map(ExternalIdentity)
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Middleware attaching [`ExternalClaims`] from the bearer token.
pub async fn require_external_identity(mut request: Request, next: Next) -> Response {
    let claims = match bearer_token(request.headers()).and_then(decode_external_claims) {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    tracing::debug!(auth_id = %claims.auth_id, "external identity attached");
    request.extensions_mut().insert(UnverifiedClaims(claims));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity;
    use base64::Engine;

    /// Build an unsigned JWT for testing.
    fn make_token(claims: &serde_json::Value) -> String {
        let header = serde_json::json!({ "alg": "RS256", "typ": "JWT" });
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header_b64 = engine.encode(serde_json::to_string(&header).unwrap());
        let claims_b64 = engine.encode(serde_json::to_string(claims).unwrap());
        format!("{}.{}.fake_signature", header_b64, claims_b64)
    }

    #[test]
    fn decodes_primary_name_claims() {
        let token = make_token(&serde_json::json!({
            "sub": "user_2abc",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
        }));

        let claims = decode_external_claims(&token).unwrap();
        assert_eq!(claims.auth_id, "user_2abc");
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.last_name, "Lovelace");
        assert_eq!(claims.email, "ada@example.com");
    }

    #[test]
    fn falls_back_to_oidc_name_claims() {
        let token = make_token(&serde_json::json!({
            "sub": "user_2abc",
            "given_name": "Grace",
            "family_name": "Hopper",
        }));

        let claims = decode_external_claims(&token).unwrap();
        assert_eq!(claims.first_name, "Grace");
        assert_eq!(claims.last_name, "Hopper");
        assert_eq!(claims.email, "");
    }

    #[test]
    fn empty_subject_is_rejected() {
        let token = make_token(&serde_json::json!({ "sub": "", "email": "x@example.com" }));
        assert_eq!(decode_external_claims(&token), Err(AuthError::InvalidToken));

        let token = make_token(&serde_json::json!({ "email": "x@example.com" }));
        assert_eq!(decode_external_claims(&token), Err(AuthError::InvalidToken));
    }

    /// Join raw header and payload JSON into an unsigned token.
    fn raw_token(header: &str, payload: &str) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        format!("{}.{}.sig", engine.encode(header), engine.encode(payload))
    }

    #[test]
    fn header_segment_is_not_interpreted() {
        let claims =
            decode_external_claims(&raw_token(r#"{"alg":"none"}"#, r#"{"sub":"user_1"}"#)).unwrap();
        assert_eq!(claims.auth_id, "user_1");

        let claims = decode_external_claims(&raw_token("x", r#"{"sub":"user_1"}"#)).unwrap();
        assert_eq!(claims.auth_id, "user_1");
    }

    #[test]
    fn non_string_claims_fall_back() {
        let token = raw_token(
            r#"{"alg":"RS256"}"#,
            r#"{"sub":"user_1","first_name":null,"given_name":"G","last_name":42,"family_name":"L","email":["x"]}"#,
        );
        let claims = decode_external_claims(&token).unwrap();
        assert_eq!(claims.first_name, "G");
        assert_eq!(claims.last_name, "L");
        assert_eq!(claims.email, "");

        let token = raw_token(r#"{"alg":"RS256"}"#, r#"{"sub":7}"#);
        assert_eq!(decode_external_claims(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn structurally_invalid_tokens_are_rejected() {
        assert!(decode_external_claims("only.two").is_err());
        assert!(decode_external_claims("a.b.c.d").is_err());
        assert!(decode_external_claims("a.!!!notbase64!!!.c").is_err());
    }

    #[test]
    fn claims_do_not_count_as_verified_identity() {
        let mut extensions = Extensions::new();
        extensions.insert(UnverifiedClaims(ExternalClaims {
            auth_id: "user_2abc".into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }));

        assert!(external_identity(&extensions).is_some());
        assert!(identity(&extensions).is_none());
    }
}
