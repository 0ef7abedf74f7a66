// --- File: crates/solarify_marketing/src/routes.rs ---
use crate::handlers::{
    create_campaign_handler, create_post_handler, delete_campaign_handler, delete_post_handler,
    get_campaign_handler, get_post_handler, list_campaigns_handler, list_posts_handler,
    update_campaign_handler, update_post_handler, MarketingState,
};
use axum::{routing::get, Router};
use solarify_config::AppConfig;
use solarify_db::Repositories;
use std::sync::Arc;

/// Creates a router containing all routes for the marketing feature.
pub fn routes(config: Arc<AppConfig>, repos: Repositories) -> Router {
    let state = Arc::new(MarketingState { config, repos });

    Router::new()
        .route(
            "/marketing/campaigns",
            get(list_campaigns_handler).post(create_campaign_handler),
        )
        .route(
            "/marketing/campaigns/{id}",
            get(get_campaign_handler)
                .patch(update_campaign_handler)
                .delete(delete_campaign_handler),
        )
        .route(
            "/marketing/social-posts",
            get(list_posts_handler).post(create_post_handler),
        )
        .route(
            "/marketing/social-posts/{id}",
            get(get_post_handler)
                .patch(update_post_handler)
                .delete(delete_post_handler),
        )
        .with_state(state)
}
