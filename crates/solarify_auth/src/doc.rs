// File: crates/solarify_auth/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{LoginRequest, LogoutResponse, PreferenceRequest, RegisterRequest};
use solarify_db::models::User;

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body(content = RegisterRequest, example = json!({
        "username": "ops",
        "email": "ops@solarify.example",
        "password": "correct-horse-battery"
    })),
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Invalid username, email or password"),
        (status = 409, description = "Username already taken")
    )
)]
fn doc_register_handler() {}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie set", body = User),
        (status = 401, description = "Invalid username or password")
    )
)]
fn doc_login_handler() {}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session invalidated", body = LogoutResponse)
    )
)]
fn doc_logout_handler() {}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Currently authenticated user", body = User),
        (status = 401, description = "No valid session")
    )
)]
fn doc_me_handler() {}

#[utoipa::path(
    put,
    path = "/auth/notification-preference",
    request_body = PreferenceRequest,
    responses(
        (status = 200, description = "Preference updated", body = User),
        (status = 401, description = "No valid session")
    )
)]
fn doc_set_notification_preference_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_register_handler,
        doc_login_handler,
        doc_logout_handler,
        doc_me_handler,
        doc_set_notification_preference_handler
    ),
    components(
        schemas(RegisterRequest, LoginRequest, PreferenceRequest, LogoutResponse, User)
    ),
    tags(
        (name = "auth", description = "Session authentication API")
    ),
    servers(
        (url = "/api", description = "Solarify API server")
    )
)]
pub struct AuthApiDoc;
