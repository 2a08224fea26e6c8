// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{verify_secret, TokenService};
use crate::storage::{User, UserRepository};

use super::{ServiceError, ServiceResult};

/// Token and profile returned by a successful login.
#[derive(Debug)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

/// Email/password login.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> ServiceResult<LoginResult> {
        let user = self
            .users
            .get_by_email(email)?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_secret(password, &user.password_hash) {
            tracing::info!(user_id = %user.id, "login rejected");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id).map_err(ServiceError::TokenIssue)?;
        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(LoginResult { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::services::{ErrorKind, NewUser, UserService};
    use crate::storage::Database;

    fn setup() -> (AuthService, UserService, Arc<TokenService>) {
        let db = Arc::new(Database::in_memory().unwrap());
        let tokens = Arc::new(TokenService::new("test-secret", Duration::from_secs(3600)));
        (
            AuthService::new(db.clone(), tokens.clone()),
            UserService::new(db, "system"),
            tokens,
        )
    }

    fn register(users: &UserService) -> User {
        users
            .create(NewUser {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                password: "analytical-engine".into(),
            })
            .unwrap()
    }

    #[test]
    fn correct_password_yields_verifiable_token() {
        let (auth, users, tokens) = setup();
        let ada = register(&users);

        let result = auth.login("ada@example.com", "analytical-engine").unwrap();
        assert_eq!(result.user.id, ada.id);
        assert_eq!(tokens.verify(&result.token).unwrap(), ada.id);
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let (auth, users, _) = setup();
        register(&users);

        let wrong = auth.login("ada@example.com", "difference-engine").unwrap_err();
        let unknown = auth.login("nobody@example.com", "analytical-engine").unwrap_err();

        assert_eq!(wrong.kind(), ErrorKind::Unauthenticated);
        assert_eq!(wrong.public_message(), unknown.public_message());
        assert_eq!(wrong.public_message(), "Invalid email or password");
    }

    #[test]
    fn synced_account_cannot_password_login() {
        let (auth, users, _) = setup();
        users
            .sync_by_auth_id(&crate::auth::ExternalClaims {
                auth_id: "ext_1".into(),
                first_name: String::new(),
                last_name: String::new(),
                email: "ext@example.com".into(),
            })
            .unwrap();

        assert!(matches!(
            auth.login("ext@example.com", ""),
            Err(ServiceError::InvalidCredentials)
        ));
    }
}
