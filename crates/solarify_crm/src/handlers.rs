// --- File: crates/solarify_crm/src/handlers.rs ---
use crate::logic::{
    self, ContactListQuery, DeleteResponse, OpportunityListQuery,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use solarify_common::{not_found, validation_error, SolarifyError};
use solarify_config::AppConfig;
use solarify_db::models::{
    Company, Contact, NewCompany, NewContact, NewOpportunity, Opportunity, UpdateCompany,
    UpdateContact, UpdateOpportunity,
};
use solarify_db::repositories::{CompanyRepository, ContactRepository, OpportunityRepository};
use solarify_db::Repositories;
use std::sync::Arc;
use tracing::info;

// Shared state for the CRM handlers
#[derive(Clone)]
pub struct CrmState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
}

// --- Companies ---

/// Handler to list all companies.
#[axum::debug_handler]
pub async fn list_companies_handler(
    State(state): State<Arc<CrmState>>,
) -> Result<Json<Vec<Company>>, SolarifyError> {
    let companies = state.repos.companies.list().await?;
    Ok(Json(companies))
}

/// Handler to create a company.
#[axum::debug_handler]
pub async fn create_company_handler(
    State(state): State<Arc<CrmState>>,
    Json(payload): Json<NewCompany>,
) -> Result<Json<Company>, SolarifyError> {
    logic::validate_new_company(&payload)?;

    let company = state.repos.companies.create(payload).await?;
    info!("Created company {}", company.id);
    Ok(Json(company))
}

/// Handler to fetch one company by id.
#[axum::debug_handler]
pub async fn get_company_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
) -> Result<Json<Company>, SolarifyError> {
    let company = state
        .repos
        .companies
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("company {id} not found")))?;

    Ok(Json(company))
}

/// Handler to partially update a company.
#[axum::debug_handler]
pub async fn update_company_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCompany>,
) -> Result<Json<Company>, SolarifyError> {
    let company = state
        .repos
        .companies
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(format!("company {id} not found")))?;

    Ok(Json(company))
}

/// Handler to delete a company.
#[axum::debug_handler]
pub async fn delete_company_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, SolarifyError> {
    if !state.repos.companies.delete(id).await? {
        return Err(not_found(format!("company {id} not found")));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Company deleted.".to_string(),
    }))
}

// --- Contacts ---

/// Handler to list contacts, optionally scoped to a company.
#[axum::debug_handler]
pub async fn list_contacts_handler(
    State(state): State<Arc<CrmState>>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<Vec<Contact>>, SolarifyError> {
    let contacts = state.repos.contacts.list(query.company_id).await?;
    Ok(Json(contacts))
}

/// Handler to create a contact.
#[axum::debug_handler]
pub async fn create_contact_handler(
    State(state): State<Arc<CrmState>>,
    Json(payload): Json<NewContact>,
) -> Result<Json<Contact>, SolarifyError> {
    logic::validate_new_contact(&payload)?;

    if let Some(company_id) = payload.company_id {
        if state.repos.companies.find_by_id(company_id).await?.is_none() {
            return Err(validation_error(format!(
                "company {company_id} does not exist"
            )));
        }
    }

    let contact = state.repos.contacts.create(payload).await?;
    info!("Created contact {}", contact.id);
    Ok(Json(contact))
}

/// Handler to fetch one contact by id.
#[axum::debug_handler]
pub async fn get_contact_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, SolarifyError> {
    let contact = state
        .repos
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("contact {id} not found")))?;

    Ok(Json(contact))
}

/// Handler to partially update a contact.
#[axum::debug_handler]
pub async fn update_contact_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContact>,
) -> Result<Json<Contact>, SolarifyError> {
    if let Some(company_id) = payload.company_id {
        if state.repos.companies.find_by_id(company_id).await?.is_none() {
            return Err(validation_error(format!(
                "company {company_id} does not exist"
            )));
        }
    }

    let contact = state
        .repos
        .contacts
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(format!("contact {id} not found")))?;

    Ok(Json(contact))
}

/// Handler to delete a contact.
#[axum::debug_handler]
pub async fn delete_contact_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, SolarifyError> {
    if !state.repos.contacts.delete(id).await? {
        return Err(not_found(format!("contact {id} not found")));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Contact deleted.".to_string(),
    }))
}

// --- Opportunities ---

/// Handler to list opportunities, optionally filtered by stage.
#[axum::debug_handler]
pub async fn list_opportunities_handler(
    State(state): State<Arc<CrmState>>,
    Query(query): Query<OpportunityListQuery>,
) -> Result<Json<Vec<Opportunity>>, SolarifyError> {
    let opportunities = state.repos.opportunities.list(query.stage).await?;
    Ok(Json(opportunities))
}

/// Handler to create an opportunity.
///
/// The referenced company (and contact, when given) must exist; a dangling
/// reference is a validation error, not a server fault.
#[axum::debug_handler]
pub async fn create_opportunity_handler(
    State(state): State<Arc<CrmState>>,
    Json(payload): Json<NewOpportunity>,
) -> Result<Json<Opportunity>, SolarifyError> {
    logic::validate_new_opportunity(&payload)?;

    if state
        .repos
        .companies
        .find_by_id(payload.company_id)
        .await?
        .is_none()
    {
        return Err(validation_error(format!(
            "company {} does not exist",
            payload.company_id
        )));
    }
    if let Some(contact_id) = payload.contact_id {
        if state.repos.contacts.find_by_id(contact_id).await?.is_none() {
            return Err(validation_error(format!(
                "contact {contact_id} does not exist"
            )));
        }
    }

    let opportunity = state.repos.opportunities.create(payload).await?;
    info!("Created opportunity {}", opportunity.id);
    Ok(Json(opportunity))
}

/// Handler to fetch one opportunity by id.
#[axum::debug_handler]
pub async fn get_opportunity_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
) -> Result<Json<Opportunity>, SolarifyError> {
    let opportunity = state
        .repos
        .opportunities
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("opportunity {id} not found")))?;

    Ok(Json(opportunity))
}

/// Handler to partially update an opportunity (stage moves included).
#[axum::debug_handler]
pub async fn update_opportunity_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOpportunity>,
) -> Result<Json<Opportunity>, SolarifyError> {
    if let Some(contact_id) = payload.contact_id {
        if state.repos.contacts.find_by_id(contact_id).await?.is_none() {
            return Err(validation_error(format!(
                "contact {contact_id} does not exist"
            )));
        }
    }

    let opportunity = state
        .repos
        .opportunities
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(format!("opportunity {id} not found")))?;

    Ok(Json(opportunity))
}

/// Handler to delete an opportunity.
#[axum::debug_handler]
pub async fn delete_opportunity_handler(
    State(state): State<Arc<CrmState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, SolarifyError> {
    if !state.repos.opportunities.delete(id).await? {
        return Err(not_found(format!("opportunity {id} not found")));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Opportunity deleted.".to_string(),
    }))
}
