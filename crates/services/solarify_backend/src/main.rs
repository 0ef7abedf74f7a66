// File: crates/services/solarify_backend/src/main.rs
//! Solarify API server: config + logging init, schema bootstrap, router
//! assembly and serving.
//!
//! Feature crates contribute their routers under `/api`; admin surfaces
//! are wrapped in the session middleware here so the crates themselves
//! stay free of auth wiring.

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use solarify_auth::require_session;
use solarify_config::{ensure_dotenv_loaded, load_config};
use solarify_db::repositories::SessionRepository;
use solarify_db::{DbClient, Repositories};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

#[cfg(feature = "gcal")]
use solarify_gcal::CredentialEnv;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

#[axum::debug_handler]
async fn health_handler(State(db_client): State<DbClient>) -> Json<HealthResponse> {
    let database = if db_client.is_healthy().await {
        "up"
    } else {
        "down"
    };
    Json(HealthResponse {
        status: "ok",
        database,
    })
}

#[tokio::main]
async fn main() {
    ensure_dotenv_loaded();
    let config = Arc::new(load_config().expect("Failed to load configuration"));
    solarify_common::logging::init();

    let db_client = DbClient::new(&config)
        .await
        .expect("Failed to connect to the database");
    let repos = Repositories::new(db_client.clone());
    repos
        .init_schema()
        .await
        .expect("Failed to initialize the database schema");

    // Startup housekeeping; expiry is otherwise enforced on read.
    match repos.sessions.purge_expired(chrono::Utc::now()).await {
        Ok(purged) if purged > 0 => info!("Purged {} expired sessions", purged),
        Ok(_) => {}
        Err(e) => warn!("Failed to purge expired sessions: {}", e),
    }

    let auth_state = solarify_auth::routes::auth_state(config.clone(), repos.clone());

    #[cfg(any(feature = "shop", feature = "notify"))]
    let alert_store = Arc::new(solarify_notify::AlertStore::new());

    let mut api = Router::new()
        .route("/health", get(health_handler))
        .with_state(db_client.clone())
        .merge(solarify_auth::routes::routes(auth_state.clone()));

    #[cfg(feature = "crm")]
    {
        let crm = solarify_crm::routes::routes(config.clone(), repos.clone())
            .route_layer(from_fn_with_state(auth_state.clone(), require_session));
        api = api.merge(crm);
    }

    #[cfg(feature = "shop")]
    {
        let shop =
            solarify_shop::routes::routes(config.clone(), repos.clone(), alert_store.clone())
                .route_layer(from_fn_with_state(auth_state.clone(), require_session));
        api = api.merge(shop);
    }

    #[cfg(feature = "marketing")]
    {
        let marketing = solarify_marketing::routes::routes(config.clone(), repos.clone())
            .route_layer(from_fn_with_state(auth_state.clone(), require_session));
        api = api.merge(marketing);
    }

    #[cfg(feature = "notify")]
    {
        let notify = solarify_notify::routes::routes(alert_store.clone())
            .route_layer(from_fn_with_state(auth_state.clone(), require_session));
        api = api.merge(notify);
    }

    #[cfg(feature = "gcal")]
    {
        if solarify_common::is_gcal_enabled(&config) {
            let gcal_state = solarify_gcal::routes::gcal_state(
                config.clone(),
                repos.clone(),
                CredentialEnv::from_process(),
            );
            // Availability lookup and booking creation stay public; the
            // admin surface sits behind the session middleware.
            api = api
                .merge(solarify_gcal::routes::routes(gcal_state.clone()))
                .merge(
                    solarify_gcal::routes::admin_routes(gcal_state)
                        .route_layer(from_fn_with_state(auth_state.clone(), require_session)),
                );
        } else {
            info!("Calendar booking disabled (use_gcal is false or gcal config missing)");
        }
    }

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        // The marketing frontend is served from a different origin.
        .layer(CorsLayer::permissive());

    #[cfg(feature = "openapi")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Solarify API",
                version = "0.1.0",
                description = "CRM, shop, marketing and booking API for Solarify"
            ),
            servers((url = "/api", description = "Main API prefix"))
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(solarify_auth::doc::AuthApiDoc::openapi());
        #[cfg(feature = "crm")]
        openapi_doc.merge(solarify_crm::doc::CrmApiDoc::openapi());
        #[cfg(feature = "shop")]
        openapi_doc.merge(solarify_shop::doc::ShopApiDoc::openapi());
        #[cfg(feature = "marketing")]
        openapi_doc.merge(solarify_marketing::doc::MarketingApiDoc::openapi());
        #[cfg(feature = "notify")]
        openapi_doc.merge(solarify_notify::doc::NotifyApiDoc::openapi());
        #[cfg(feature = "gcal")]
        openapi_doc.merge(solarify_gcal::doc::GcalApiDoc::openapi());

        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi_doc);
        app.merge(swagger_ui)
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Solarify API listening on http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
