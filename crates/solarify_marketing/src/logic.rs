// --- File: crates/solarify_marketing/src/logic.rs ---
use serde::{Deserialize, Serialize};
use solarify_common::{validation_error, SolarifyError};
use solarify_db::models::{NewCampaign, NewSocialPost, PostStatus, UpdateCampaign};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct PostListQuery {
    /// Restrict the listing to posts of one campaign
    pub campaign_id: Option<i64>,
    /// Restrict the listing to one post status
    pub status: Option<PostStatus>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

// --- Validation ---

pub fn validate_new_campaign(campaign: &NewCampaign) -> Result<(), SolarifyError> {
    if campaign.name.trim().is_empty() {
        return Err(validation_error("campaign name must not be empty"));
    }
    if let Some(budget) = campaign.budget_cents {
        if budget < 0 {
            return Err(validation_error("campaign budget must not be negative"));
        }
    }
    if let (Some(starts), Some(ends)) = (campaign.starts_on, campaign.ends_on) {
        if ends < starts {
            return Err(validation_error("campaign must not end before it starts"));
        }
    }
    Ok(())
}

pub fn validate_campaign_update(update: &UpdateCampaign) -> Result<(), SolarifyError> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(validation_error("campaign name must not be empty"));
        }
    }
    if let Some(budget) = update.budget_cents {
        if budget < 0 {
            return Err(validation_error("campaign budget must not be negative"));
        }
    }
    if let (Some(starts), Some(ends)) = (update.starts_on, update.ends_on) {
        if ends < starts {
            return Err(validation_error("campaign must not end before it starts"));
        }
    }
    Ok(())
}

pub fn validate_new_post(post: &NewSocialPost) -> Result<(), SolarifyError> {
    if post.content.trim().is_empty() {
        return Err(validation_error("post content must not be empty"));
    }
    if post.status == PostStatus::Scheduled && post.scheduled_for.is_none() {
        return Err(validation_error(
            "a scheduled post needs a scheduled_for time",
        ));
    }
    Ok(())
}
