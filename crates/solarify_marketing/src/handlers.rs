// --- File: crates/solarify_marketing/src/handlers.rs ---
use crate::logic::{self, DeleteResponse, PostListQuery};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use solarify_common::{not_found, validation_error, SolarifyError};
use solarify_config::AppConfig;
use solarify_db::models::{
    Campaign, NewCampaign, NewSocialPost, SocialPost, UpdateCampaign, UpdateSocialPost,
};
use solarify_db::repositories::{CampaignRepository, SocialPostRepository};
use solarify_db::Repositories;
use std::sync::Arc;
use tracing::info;

// Shared state for the marketing handlers
#[derive(Clone)]
pub struct MarketingState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
}

// --- Campaigns ---

/// Handler to list all campaigns.
#[axum::debug_handler]
pub async fn list_campaigns_handler(
    State(state): State<Arc<MarketingState>>,
) -> Result<Json<Vec<Campaign>>, SolarifyError> {
    let campaigns = state.repos.campaigns.list().await?;
    Ok(Json(campaigns))
}

/// Handler to create a campaign.
#[axum::debug_handler]
pub async fn create_campaign_handler(
    State(state): State<Arc<MarketingState>>,
    Json(payload): Json<NewCampaign>,
) -> Result<Json<Campaign>, SolarifyError> {
    logic::validate_new_campaign(&payload)?;

    let campaign = state.repos.campaigns.create(payload).await?;
    info!("Created campaign {}", campaign.id);
    Ok(Json(campaign))
}

/// Handler to fetch one campaign by id.
#[axum::debug_handler]
pub async fn get_campaign_handler(
    State(state): State<Arc<MarketingState>>,
    Path(id): Path<i64>,
) -> Result<Json<Campaign>, SolarifyError> {
    let campaign = state
        .repos
        .campaigns
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("campaign {id} not found")))?;

    Ok(Json(campaign))
}

/// Handler to partially update a campaign.
#[axum::debug_handler]
pub async fn update_campaign_handler(
    State(state): State<Arc<MarketingState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCampaign>,
) -> Result<Json<Campaign>, SolarifyError> {
    logic::validate_campaign_update(&payload)?;

    let campaign = state
        .repos
        .campaigns
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(format!("campaign {id} not found")))?;

    Ok(Json(campaign))
}

/// Handler to delete a campaign. Posts that referenced it survive with
/// their campaign link cleared.
#[axum::debug_handler]
pub async fn delete_campaign_handler(
    State(state): State<Arc<MarketingState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, SolarifyError> {
    if !state.repos.campaigns.delete(id).await? {
        return Err(not_found(format!("campaign {id} not found")));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Campaign deleted.".to_string(),
    }))
}

// --- Social posts ---

/// Handler to list posts, optionally filtered by campaign and status.
#[axum::debug_handler]
pub async fn list_posts_handler(
    State(state): State<Arc<MarketingState>>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Vec<SocialPost>>, SolarifyError> {
    let posts = state
        .repos
        .social_posts
        .list(query.campaign_id, query.status)
        .await?;
    Ok(Json(posts))
}

/// Handler to create a social post.
#[axum::debug_handler]
pub async fn create_post_handler(
    State(state): State<Arc<MarketingState>>,
    Json(payload): Json<NewSocialPost>,
) -> Result<Json<SocialPost>, SolarifyError> {
    logic::validate_new_post(&payload)?;

    if let Some(campaign_id) = payload.campaign_id {
        if state.repos.campaigns.find_by_id(campaign_id).await?.is_none() {
            return Err(validation_error(format!(
                "campaign {campaign_id} does not exist"
            )));
        }
    }

    let post = state.repos.social_posts.create(payload).await?;
    info!("Created social post {}", post.id);
    Ok(Json(post))
}

/// Handler to fetch one social post by id.
#[axum::debug_handler]
pub async fn get_post_handler(
    State(state): State<Arc<MarketingState>>,
    Path(id): Path<i64>,
) -> Result<Json<SocialPost>, SolarifyError> {
    let post = state
        .repos
        .social_posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("social post {id} not found")))?;

    Ok(Json(post))
}

/// Handler to partially update a social post.
#[axum::debug_handler]
pub async fn update_post_handler(
    State(state): State<Arc<MarketingState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSocialPost>,
) -> Result<Json<SocialPost>, SolarifyError> {
    if let Some(content) = &payload.content {
        if content.trim().is_empty() {
            return Err(validation_error("post content must not be empty"));
        }
    }
    if let Some(campaign_id) = payload.campaign_id {
        if state.repos.campaigns.find_by_id(campaign_id).await?.is_none() {
            return Err(validation_error(format!(
                "campaign {campaign_id} does not exist"
            )));
        }
    }

    let post = state
        .repos
        .social_posts
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(format!("social post {id} not found")))?;

    Ok(Json(post))
}

/// Handler to delete a social post.
#[axum::debug_handler]
pub async fn delete_post_handler(
    State(state): State<Arc<MarketingState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, SolarifyError> {
    if !state.repos.social_posts.delete(id).await? {
        return Err(not_found(format!("social post {id} not found")));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Social post deleted.".to_string(),
    }))
}
