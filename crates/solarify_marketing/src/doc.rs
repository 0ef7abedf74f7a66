// File: crates/solarify_marketing/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{DeleteResponse, PostListQuery};
use solarify_db::models::{
    Campaign, NewCampaign, NewSocialPost, SocialPost, UpdateCampaign, UpdateSocialPost,
};

#[utoipa::path(
    get,
    path = "/marketing/campaigns",
    responses((status = 200, description = "All campaigns", body = Vec<Campaign>))
)]
fn doc_list_campaigns_handler() {}

#[utoipa::path(
    post,
    path = "/marketing/campaigns",
    request_body = NewCampaign,
    responses(
        (status = 200, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid campaign payload")
    )
)]
fn doc_create_campaign_handler() {}

#[utoipa::path(
    get,
    path = "/marketing/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "The campaign", body = Campaign),
        (status = 404, description = "Campaign not found")
    )
)]
fn doc_get_campaign_handler() {}

#[utoipa::path(
    patch,
    path = "/marketing/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    request_body = UpdateCampaign,
    responses(
        (status = 200, description = "Updated campaign", body = Campaign),
        (status = 400, description = "Invalid update payload"),
        (status = 404, description = "Campaign not found")
    )
)]
fn doc_update_campaign_handler() {}

#[utoipa::path(
    delete,
    path = "/marketing/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Deletion result", body = DeleteResponse),
        (status = 404, description = "Campaign not found")
    )
)]
fn doc_delete_campaign_handler() {}

#[utoipa::path(
    get,
    path = "/marketing/social-posts",
    params(PostListQuery),
    responses((status = 200, description = "Matching posts", body = Vec<SocialPost>))
)]
fn doc_list_posts_handler() {}

#[utoipa::path(
    post,
    path = "/marketing/social-posts",
    request_body = NewSocialPost,
    responses(
        (status = 200, description = "Post created", body = SocialPost),
        (status = 400, description = "Invalid post payload or unknown campaign")
    )
)]
fn doc_create_post_handler() {}

#[utoipa::path(
    get,
    path = "/marketing/social-posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = SocialPost),
        (status = 404, description = "Post not found")
    )
)]
fn doc_get_post_handler() {}

#[utoipa::path(
    patch,
    path = "/marketing/social-posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdateSocialPost,
    responses(
        (status = 200, description = "Updated post", body = SocialPost),
        (status = 400, description = "Invalid update payload"),
        (status = 404, description = "Post not found")
    )
)]
fn doc_update_post_handler() {}

#[utoipa::path(
    delete,
    path = "/marketing/social-posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Deletion result", body = DeleteResponse),
        (status = 404, description = "Post not found")
    )
)]
fn doc_delete_post_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_campaigns_handler,
        doc_create_campaign_handler,
        doc_get_campaign_handler,
        doc_update_campaign_handler,
        doc_delete_campaign_handler,
        doc_list_posts_handler,
        doc_create_post_handler,
        doc_get_post_handler,
        doc_update_post_handler,
        doc_delete_post_handler
    ),
    components(
        schemas(
            Campaign,
            NewCampaign,
            UpdateCampaign,
            SocialPost,
            NewSocialPost,
            UpdateSocialPost,
            DeleteResponse
        )
    ),
    tags(
        (name = "marketing", description = "Campaign and social post API")
    ),
    servers(
        (url = "/api", description = "Solarify API server")
    )
)]
pub struct MarketingApiDoc;
