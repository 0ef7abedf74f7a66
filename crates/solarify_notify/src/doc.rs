// File: crates/solarify_notify/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::alerts::Alert;
use crate::handlers::{MarkReadResponse, NotificationListQuery, NotificationsResponse};

#[utoipa::path(
    get,
    path = "/notifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "The authenticated user's alerts, newest first", body = NotificationsResponse),
        (status = 401, description = "No valid session")
    )
)]
fn doc_list_notifications_handler() {}

#[utoipa::path(
    post,
    path = "/notifications/{alert_id}/read",
    params(
        ("alert_id" = String, Path, description = "Alert identifier")
    ),
    responses(
        (status = 200, description = "Alert marked as read", body = MarkReadResponse),
        (status = 401, description = "No valid session"),
        (status = 404, description = "No such alert for this user")
    )
)]
fn doc_mark_read_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_list_notifications_handler, doc_mark_read_handler),
    components(
        schemas(Alert, NotificationsResponse, MarkReadResponse)
    ),
    tags(
        (name = "notifications", description = "Stock alert inbox API")
    ),
    servers(
        (url = "/api", description = "Solarify API server")
    )
)]
pub struct NotifyApiDoc;
