// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP surface.
//!
//! Authentication is attached per route with `route_layer`, so one path can
//! mix public and protected methods (`POST /users` registers, `GET /users`
//! needs a token).

use std::time::Duration;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, require_external_identity},
    models::{
        CategoryRequest, CategoryResponse, CurrenciesResponse, LoginRequest, LoginResponse,
        MessageResponse, TypeOption, UserRequest, UserResponse, WalletRequest, WalletResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod categories;
mod extract;
pub mod health;
pub mod users;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let auth = from_fn_with_state(state.clone(), require_auth);

    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route("/auth/login", post(auth::login))
        .route(
            "/users",
            get(users::list_users)
                .route_layer(auth.clone())
                .post(users::create_user),
        )
        .route(
            "/users/sync",
            post(users::sync_user).route_layer(from_fn(require_external_identity)),
        )
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .route_layer(auth.clone()),
        )
        .route("/categories/types", get(categories::category_types))
        .route(
            "/categories",
            get(categories::list_categories)
                .post(categories::create_category)
                .route_layer(auth.clone()),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category)
                .route_layer(auth.clone()),
        )
        .route("/wallets/currencies", get(wallets::currencies))
        .route("/wallets/types", get(wallets::wallet_types))
        .route(
            "/wallets",
            get(wallets::list_wallets)
                .post(wallets::create_wallet)
                .route_layer(auth.clone()),
        )
        .route(
            "/wallets/{id}",
            get(wallets::get_wallet)
                .put(wallets::update_wallet)
                .delete(wallets::delete_wallet)
                .route_layer(auth),
        )
        .with_state(state);

    routes.merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

/// Wrap the router in request-id, tracing, timeout and CORS layers.
///
/// Outermost first: the request id is assigned before the trace span opens,
/// so every log line for a request carries it.
pub fn with_transport_layers(app: Router, request_timeout: Duration) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(trace)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(CorsLayer::permissive()),
    )
}

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::ready,
        auth::login,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::sync_user,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        categories::category_types,
        wallets::list_wallets,
        wallets::create_wallet,
        wallets::get_wallet,
        wallets::update_wallet,
        wallets::delete_wallet,
        wallets::currencies,
        wallets::wallet_types
    ),
    components(
        schemas(
            MessageResponse,
            TypeOption,
            LoginRequest,
            LoginResponse,
            UserRequest,
            UserResponse,
            CategoryRequest,
            CategoryResponse,
            WalletRequest,
            WalletResponse,
            CurrenciesResponse,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Auth", description = "Password login"),
        (name = "Users", description = "Account registration and self-service profile"),
        (name = "Categories", description = "Per-user transaction categories"),
        (name = "Wallets", description = "Per-user wallets and currency catalog")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method},
    };
    use base64::Engine;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestApp {
        state: AppState,
        app: Router,
    }

    impl TestApp {
        fn new() -> Self {
            let state = AppState::for_tests();
            Self {
                app: router(state.clone()),
                state,
            }
        }

        fn token_for(&self, user_id: &str) -> String {
            self.state.tokens.issue(user_id).unwrap()
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = axum::http::Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let body = match body {
                Some(value) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };

            let response = self
                .app
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn register(&self, email: &str, password: &str) {
            let (status, _) = self
                .send(
                    Method::POST,
                    "/users",
                    None,
                    Some(json!({
                        "first_name": "Ada",
                        "last_name": "Lovelace",
                        "email": email,
                        "password": password,
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    fn wallet_body(name: &str) -> Value {
        json!({ "name": name, "type": 0, "balance": 100.5, "currency": "USD" })
    }

    #[tokio::test]
    async fn router_builds_with_transport_layers() {
        let app = with_transport_layers(
            router(AppState::for_tests()),
            Duration::from_secs(5),
        );
        let response = app
            .oneshot(axum::http::Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn protected_route_without_header_is_rejected_with_exact_body() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/wallets", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Authorization header required" }));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::GET, "/categories", Some("not-a-jwt"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid or expired token" }));
    }

    #[tokio::test]
    async fn foreign_wallet_is_forbidden() {
        let app = TestApp::new();
        let owner = app.token_for("u1");
        let intruder = app.token_for("u2");

        let (status, body) = app
            .send(Method::POST, "/wallets", Some(&owner), Some(wallet_body("Main")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Wallet created successfully" }));

        let (_, listed) = app.send(Method::GET, "/wallets", Some(&owner), None).await;
        let id = listed[0]["id"].as_str().unwrap().to_string();
        assert_eq!(listed[0]["currency"], "USD");
        assert_eq!(listed[0]["created_by"], "system");

        let uri = format!("/wallets/{id}");
        let (status, _) = app.send(Method::GET, &uri, Some(&intruder), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = app
            .send(Method::PUT, &uri, Some(&intruder), Some(wallet_body("Mine")))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = app.send(Method::DELETE, &uri, Some(&intruder), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app.send(Method::GET, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Main");
    }

    #[tokio::test]
    async fn lists_are_scoped_to_the_caller() {
        let app = TestApp::new();
        let u1 = app.token_for("u1");
        let u2 = app.token_for("u2");

        for name in ["Groceries", "Rent"] {
            app.send(
                Method::POST,
                "/categories",
                Some(&u1),
                Some(json!({ "name": name, "type": 0 })),
            )
            .await;
        }
        app.send(
            Method::POST,
            "/categories",
            Some(&u2),
            Some(json!({ "name": "Salary", "type": 1 })),
        )
        .await;

        let (status, mine) = app.send(Method::GET, "/categories", Some(&u1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine.as_array().unwrap().len(), 2);

        let (_, theirs) = app.send(Method::GET, "/categories", Some(&u2), None).await;
        assert_eq!(theirs.as_array().unwrap().len(), 1);
        assert_eq!(theirs[0]["type_name"], "Income");
    }

    #[tokio::test]
    async fn invalid_enum_values_are_bad_requests() {
        let app = TestApp::new();
        let token = app.token_for("u1");

        let (status, body) = app
            .send(
                Method::POST,
                "/categories",
                Some(&token),
                Some(json!({ "name": "Odd", "type": 99 })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid category type"));

        let mut wallet = wallet_body("Main");
        wallet["currency"] = json!("INVALID");
        let (status, body) = app
            .send(Method::POST, "/wallets", Some(&token), Some(wallet))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid currency code" }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = TestApp::new();
        let token = app.token_for("u1");
        let response = app
            .app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::POST)
                    .uri("/wallets")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_then_login() {
        let app = TestApp::new();
        app.register("ada@example.com", "analytical").await;

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": "ada@example.com", "password": "wrong-password" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid email or password" }));

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": "ada@example.com", "password": "analytical" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ada@example.com");

        let token = body["token"].as_str().unwrap().to_string();
        let user_id = body["user"]["id"].as_str().unwrap().to_string();
        let (status, profile) = app
            .send(Method::GET, &format!("/users/{user_id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["first_name"], "Ada");
        assert!(profile.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn registration_is_public_but_listing_is_not() {
        let app = TestApp::new();
        app.register("grace@example.com", "compilers").await;

        let (status, _) = app.send(Method::GET, "/users", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = app.token_for("anyone");
        let (status, users) = app.send(Method::GET, "/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn profiles_are_self_only() {
        let app = TestApp::new();
        let token = app.token_for("u1");
        let (status, body) = app
            .send(Method::GET, "/users/u2", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn catalogs_are_public() {
        let app = TestApp::new();

        let (status, types) = app.send(Method::GET, "/categories/types", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(types[2], json!({ "value": 2, "name": "Investment" }));

        let (status, types) = app.send(Method::GET, "/wallets/types", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(types.as_array().unwrap().len(), 7);

        let (status, currencies) = app
            .send(Method::GET, "/wallets/currencies", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(currencies["crypto"]
            .as_array()
            .unwrap()
            .contains(&json!("BTC")));
    }

    #[tokio::test]
    async fn sync_links_upstream_identity_once() {
        let app = TestApp::new();
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let claims = engine.encode(
            json!({
                "sub": "user_2abc",
                "first_name": "Katherine",
                "last_name": "Johnson",
                "email": "kj@example.com",
            })
            .to_string(),
        );
        let upstream = format!("{header}.{claims}.unsigned");

        let (status, first) = app
            .send(Method::POST, "/users/sync", Some(&upstream), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["email"], "kj@example.com");

        let (_, second) = app
            .send(Method::POST, "/users/sync", Some(&upstream), None)
            .await;
        assert_eq!(first["id"], second["id"]);

        let (status, _) = app.send(Method::POST, "/users/sync", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(doc.paths.paths.contains_key("/wallets/{id}"));
    }
}
