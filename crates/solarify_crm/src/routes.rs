// --- File: crates/solarify_crm/src/routes.rs ---
use crate::handlers::{
    create_company_handler, create_contact_handler, create_opportunity_handler,
    delete_company_handler, delete_contact_handler, delete_opportunity_handler,
    get_company_handler, get_contact_handler, get_opportunity_handler, list_companies_handler,
    list_contacts_handler, list_opportunities_handler, update_company_handler,
    update_contact_handler, update_opportunity_handler, CrmState,
};
use axum::{routing::get, Router};
use solarify_config::AppConfig;
use solarify_db::Repositories;
use std::sync::Arc;

/// Creates a router containing all routes for the CRM feature.
pub fn routes(config: Arc<AppConfig>, repos: Repositories) -> Router {
    let state = Arc::new(CrmState { config, repos });

    Router::new()
        .route(
            "/crm/companies",
            get(list_companies_handler).post(create_company_handler),
        )
        .route(
            "/crm/companies/{id}",
            get(get_company_handler)
                .patch(update_company_handler)
                .delete(delete_company_handler),
        )
        .route(
            "/crm/contacts",
            get(list_contacts_handler).post(create_contact_handler),
        )
        .route(
            "/crm/contacts/{id}",
            get(get_contact_handler)
                .patch(update_contact_handler)
                .delete(delete_contact_handler),
        )
        .route(
            "/crm/opportunities",
            get(list_opportunities_handler).post(create_opportunity_handler),
        )
        .route(
            "/crm/opportunities/{id}",
            get(get_opportunity_handler)
                .patch(update_opportunity_handler)
                .delete(delete_opportunity_handler),
        )
        .with_state(state)
}
