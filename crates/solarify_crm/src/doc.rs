// File: crates/solarify_crm/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{ContactListQuery, DeleteResponse, OpportunityListQuery};
use solarify_db::models::{
    Company, Contact, NewCompany, NewContact, NewOpportunity, Opportunity, UpdateCompany,
    UpdateContact, UpdateOpportunity,
};

#[utoipa::path(
    get,
    path = "/crm/companies",
    responses((status = 200, description = "All companies", body = Vec<Company>))
)]
fn doc_list_companies_handler() {}

#[utoipa::path(
    post,
    path = "/crm/companies",
    request_body = NewCompany,
    responses(
        (status = 200, description = "Company created", body = Company),
        (status = 400, description = "Invalid company payload")
    )
)]
fn doc_create_company_handler() {}

#[utoipa::path(
    get,
    path = "/crm/companies/{id}",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "The company", body = Company),
        (status = 404, description = "Company not found")
    )
)]
fn doc_get_company_handler() {}

#[utoipa::path(
    patch,
    path = "/crm/companies/{id}",
    params(("id" = i64, Path, description = "Company id")),
    request_body = UpdateCompany,
    responses(
        (status = 200, description = "Updated company", body = Company),
        (status = 404, description = "Company not found")
    )
)]
fn doc_update_company_handler() {}

#[utoipa::path(
    delete,
    path = "/crm/companies/{id}",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Deletion result", body = DeleteResponse),
        (status = 404, description = "Company not found")
    )
)]
fn doc_delete_company_handler() {}

#[utoipa::path(
    get,
    path = "/crm/contacts",
    params(ContactListQuery),
    responses((status = 200, description = "Contacts, optionally scoped to a company", body = Vec<Contact>))
)]
fn doc_list_contacts_handler() {}

#[utoipa::path(
    post,
    path = "/crm/contacts",
    request_body = NewContact,
    responses(
        (status = 200, description = "Contact created", body = Contact),
        (status = 400, description = "Invalid contact payload or unknown company")
    )
)]
fn doc_create_contact_handler() {}

#[utoipa::path(
    get,
    path = "/crm/opportunities",
    params(OpportunityListQuery),
    responses((status = 200, description = "Opportunities, optionally filtered by stage", body = Vec<Opportunity>))
)]
fn doc_list_opportunities_handler() {}

#[utoipa::path(
    post,
    path = "/crm/opportunities",
    request_body(content = NewOpportunity, example = json!({
        "company_id": 1,
        "title": "Rooftop array for HQ",
        "stage": "lead",
        "amount_cents": 1200000
    })),
    responses(
        (status = 200, description = "Opportunity created", body = Opportunity),
        (status = 400, description = "Invalid payload or dangling company/contact reference")
    )
)]
fn doc_create_opportunity_handler() {}

#[utoipa::path(
    patch,
    path = "/crm/opportunities/{id}",
    params(("id" = i64, Path, description = "Opportunity id")),
    request_body = UpdateOpportunity,
    responses(
        (status = 200, description = "Updated opportunity", body = Opportunity),
        (status = 404, description = "Opportunity not found")
    )
)]
fn doc_update_opportunity_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_companies_handler,
        doc_create_company_handler,
        doc_get_company_handler,
        doc_update_company_handler,
        doc_delete_company_handler,
        doc_list_contacts_handler,
        doc_create_contact_handler,
        doc_list_opportunities_handler,
        doc_create_opportunity_handler,
        doc_update_opportunity_handler
    ),
    components(
        schemas(
            Company,
            NewCompany,
            UpdateCompany,
            Contact,
            NewContact,
            UpdateContact,
            Opportunity,
            NewOpportunity,
            UpdateOpportunity,
            DeleteResponse
        )
    ),
    tags(
        (name = "crm", description = "Companies, contacts and opportunities API")
    ),
    servers(
        (url = "/api", description = "Solarify API server")
    )
)]
pub struct CrmApiDoc;
