// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token authentication middleware for Axum.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/wallets", get(list_wallets))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! | Request | Outcome |
//! |---------|---------|
//! | no `Authorization` header | 401 `Authorization header required` |
//! | header not `Bearer <token>` | 401 `Invalid authorization header format` |
//! | token fails verification | 401 `Invalid or expired token` |
//! | token verifies | identity attached, request forwarded |

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::context::{attach, Identity};
use super::AuthError;
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// An empty header counts as missing. The header value must split on single spaces into exactly two parts, the
/// first being `Bearer`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;
    if header.is_empty() {
        return Err(AuthError::MissingAuthHeader);
    }

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match state.tokens.verify(token) {
        Ok(subject) => {
            attach(request.extensions_mut(), Identity::new(subject));
            next.run(request).await
        }
        Err(_) => AuthError::InvalidToken.into_response(),
    }
}
